use crate::config::{SceneConfig, SceneError};
use crate::material::Material;
use std::fmt::Write as _;
use vitrine_render::UniformSink;

/// Immutable N³ volume of material bytes, generated once at startup.
///
/// Cell `(x, y, z)` lives at `x + N*(y + N*z)`: x varies fastest,
/// matching the row/layer order the 3D texture upload expects. The
/// host copy can be dropped once the renderer has taken the bytes.
pub struct VoxelGrid {
    side: u32,
    voxel_width: f32,
    data: Vec<u8>,
}

impl VoxelGrid {
    /// Classify every cell of the configured grid.
    ///
    /// Validates the configuration first; an invalid configuration is
    /// rejected here, never mid-classification.
    pub fn generate(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let n = config.voxel_count;
        let mut data = vec![0u8; (n * n * n) as usize];
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    data[Self::index(n, x, y, z)] = config.classify(x, y, z).as_byte();
                }
            }
        }

        tracing::debug!(side = n, cells = data.len(), "voxel grid generated");

        Ok(Self {
            side: n,
            voxel_width: config.voxel_width,
            data,
        })
    }

    fn index(side: u32, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < side && y < side && z < side);
        (x + side * (y + side * z)) as usize
    }

    /// Grid side length N.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Edge length of one cell in world units.
    pub fn voxel_width(&self) -> f32 {
        self.voxel_width
    }

    /// Raw material bytes in upload order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Material of one cell.
    pub fn material_at(&self, x: u32, y: u32, z: u32) -> Material {
        let byte = self.data[Self::index(self.side, x, y, z)];
        Material::from_byte(byte).expect("grid holds only material bytes")
    }

    /// Publish the three scalar shader parameters. The byte volume
    /// itself goes to the renderer's one-time texture upload.
    pub fn publish_uniforms(&self, sink: &mut impl UniformSink) {
        sink.set_f32("voxel_density", 1.0 / self.voxel_width);
        sink.set_f32("voxel_width", self.voxel_width);
        sink.set_i32("voxel_count", self.side as i32);
    }

    /// Nested brace-literal dump of the whole volume, one row per
    /// x-line. Debugging aid for eyeballing small grids.
    pub fn dump(&self) -> String {
        let n = self.side;
        let mut out = String::from("{");
        for z in 0..n {
            if z > 0 {
                out.push_str(",\n ");
            }
            out.push('{');
            for y in 0..n {
                if y > 0 {
                    out.push_str(", ");
                }
                out.push('{');
                for x in 0..n {
                    if x > 0 {
                        out.push_str(", ");
                    }
                    let byte = self.data[Self::index(n, x, y, z)];
                    let _ = write!(out, "{byte:3}");
                }
                out.push('}');
            }
            out.push('}');
        }
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_render::RecordingSink;

    #[test]
    fn every_cell_gets_exactly_one_material() {
        for n in [4u32, 8, 16] {
            let config = SceneConfig {
                voxel_count: n,
                ..SceneConfig::default()
            };
            let grid = VoxelGrid::generate(&config).unwrap();
            assert_eq!(grid.data().len(), (n * n * n) as usize);
            assert!(grid.data().iter().all(|&b| Material::from_byte(b).is_some()));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let config = SceneConfig::default();
        let a = VoxelGrid::generate(&config).unwrap();
        let b = VoxelGrid::generate(&config).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = SceneConfig {
            voxel_count: 10,
            ..SceneConfig::default()
        };
        assert!(VoxelGrid::generate(&config).is_err());
    }

    #[test]
    fn grid_agrees_with_direct_classification() {
        let config = SceneConfig::default();
        let grid = VoxelGrid::generate(&config).unwrap();
        let n = config.voxel_count;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    assert_eq!(grid.material_at(x, y, z), config.classify(x, y, z));
                }
            }
        }
    }

    #[test]
    fn publishes_the_three_scalar_parameters() {
        let config = SceneConfig {
            voxel_width: 0.5,
            ..SceneConfig::default()
        };
        let grid = VoxelGrid::generate(&config).unwrap();

        let mut sink = RecordingSink::new();
        grid.publish_uniforms(&mut sink);

        assert_eq!(sink.get_f32("voxel_width"), Some(0.5));
        assert_eq!(sink.get_f32("voxel_density"), Some(2.0));
        assert_eq!(sink.get_i32("voxel_count"), Some(16));
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn dump_covers_the_whole_volume() {
        let config = SceneConfig {
            voxel_count: 4,
            ..SceneConfig::default()
        };
        let grid = VoxelGrid::generate(&config).unwrap();
        let dump = grid.dump();

        // 4 layers of 4 rows of 4 cells, each row wrapped in braces.
        assert_eq!(dump.matches('{').count(), 1 + 4 + 16);
        assert_eq!(dump.matches('}').count(), 1 + 4 + 16);
    }
}
