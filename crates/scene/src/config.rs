use crate::material::Material;

/// Smallest grid the classification rules produce a sensible scene
/// for: below this the wall, window, and core bands collapse.
pub const MIN_GRID_SIZE: u32 = 4;

/// Errors from scene configuration preconditions.
///
/// These are rejected at configuration time, before any grid cell is
/// classified or any GPU resource is touched.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("grid size {0} is not a power of two")]
    GridSizeNotPowerOfTwo(u32),

    #[error("grid size {0} is below the minimum of {MIN_GRID_SIZE}")]
    GridSizeTooSmall(u32),

    #[error("voxel width must be positive and finite, got {0}")]
    InvalidVoxelWidth(f32),

    #[error("ratio `{name}` must be in (0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f32 },
}

/// Tunable parameters of the procedural scene.
///
/// The ratios size the centered features as fractions of the grid
/// extent; `open_far_face` selects whether the far z face gets an
/// open doorway instead of a glass pane (a scene-design choice, both
/// variants exist in the wild).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Grid side length N. Must be a power of two, at least 4.
    pub voxel_count: u32,
    /// Edge length of one cell in world units.
    pub voxel_width: f32,
    /// Extent ratio of the emissive core cube at the center.
    pub core_ratio: f32,
    /// Extent ratio of the window openings carved through the walls.
    pub window_ratio: f32,
    /// Extent ratio of the glass panes on the wall faces.
    pub glass_ratio: f32,
    /// Carve the far z face into an open doorway instead of glass.
    pub open_far_face: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            voxel_count: 16,
            voxel_width: 1.0,
            core_ratio: 0.125,
            window_ratio: 0.25,
            glass_ratio: 0.875,
            open_far_face: true,
        }
    }
}

impl SceneConfig {
    /// Check all preconditions. Call before generating a grid.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.voxel_count < MIN_GRID_SIZE {
            return Err(SceneError::GridSizeTooSmall(self.voxel_count));
        }
        if !self.voxel_count.is_power_of_two() {
            return Err(SceneError::GridSizeNotPowerOfTwo(self.voxel_count));
        }
        if !(self.voxel_width.is_finite() && self.voxel_width > 0.0) {
            return Err(SceneError::InvalidVoxelWidth(self.voxel_width));
        }
        for (name, value) in [
            ("core_ratio", self.core_ratio),
            ("window_ratio", self.window_ratio),
            ("glass_ratio", self.glass_ratio),
        ] {
            if !(value.is_finite() && value > 0.0 && value <= 1.0) {
                return Err(SceneError::RatioOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// World-space edge length of the whole grid.
    pub fn extent(&self) -> f32 {
        self.voxel_count as f32 * self.voxel_width
    }

    /// Symmetric index band of width ≈ `ratio·N` centered on the grid
    /// midpoint. Bounds are truncated, matching the reference scene:
    /// `i ∈ [trunc(0.5N − 0.5rN), trunc(0.5N + 0.5rN − 0.5)]`.
    fn in_band(&self, i: u32, ratio: f32) -> bool {
        let n = self.voxel_count as f32;
        let lo = (0.5 * n - 0.5 * ratio * n) as i64;
        let hi = (0.5 * n + 0.5 * ratio * n - 0.5) as i64;
        let i = i as i64;
        i >= lo && i <= hi
    }

    fn in_band2(&self, a: u32, b: u32, ratio: f32) -> bool {
        self.in_band(a, ratio) && self.in_band(b, ratio)
    }

    fn in_band3(&self, a: u32, b: u32, c: u32, ratio: f32) -> bool {
        self.in_band(a, ratio) && self.in_band(b, ratio) && self.in_band(c, ratio)
    }

    fn is_wall(&self, x: u32, y: u32, z: u32) -> bool {
        let max = self.voxel_count - 1;
        x == 0 || y == 0 || z == 0 || x == max || y == max || z == max
    }

    /// Classify one cell. Pure; rules apply in priority order, first
    /// match wins:
    /// 1. centered core cube → `SemiSolid`
    /// 2. window band on any axis pair → `Void` (carves through walls)
    /// 3. outer wall: outside the glass band on every pair → `Solid`;
    ///    far z face (if open) → `Void`; otherwise → `Glass`
    /// 4. interior air → `Void`
    pub fn classify(&self, x: u32, y: u32, z: u32) -> Material {
        if self.in_band3(x, y, z, self.core_ratio) {
            return Material::SemiSolid;
        }
        if self.in_band2(x, y, self.window_ratio)
            || self.in_band2(x, z, self.window_ratio)
            || self.in_band2(y, z, self.window_ratio)
        {
            return Material::Void;
        }
        if self.is_wall(x, y, z) {
            if !self.in_band2(x, y, self.glass_ratio)
                && !self.in_band2(x, z, self.glass_ratio)
                && !self.in_band2(y, z, self.glass_ratio)
            {
                return Material::Solid;
            }
            if self.open_far_face && z == self.voxel_count - 1 {
                return Material::Void;
            }
            return Material::Glass;
        }
        Material::Void
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_grid() {
        let config = SceneConfig {
            voxel_count: 12,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SceneError::GridSizeNotPowerOfTwo(12))
        ));
    }

    #[test]
    fn rejects_grid_below_minimum() {
        let config = SceneConfig {
            voxel_count: 2,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SceneError::GridSizeTooSmall(2))
        ));
    }

    #[test]
    fn rejects_bad_width_and_ratios() {
        let zero_width = SceneConfig {
            voxel_width: 0.0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(SceneError::InvalidVoxelWidth(_))
        ));

        let wide_ratio = SceneConfig {
            window_ratio: 1.5,
            ..SceneConfig::default()
        };
        assert!(matches!(
            wide_ratio.validate(),
            Err(SceneError::RatioOutOfRange {
                name: "window_ratio",
                ..
            })
        ));
    }

    #[test]
    fn band_width_matches_ratio() {
        // r=0.25 at N=16 spans indices [6, 9]: four cells.
        let config = SceneConfig::default();
        let members: Vec<u32> = (0..16).filter(|&i| config.in_band(i, 0.25)).collect();
        assert_eq!(members, vec![6, 7, 8, 9]);
    }

    #[test]
    fn full_ratio_band_covers_the_grid() {
        let config = SceneConfig::default();
        assert!((0..16).all(|i| config.in_band(i, 1.0)));
    }

    #[test]
    fn grid_center_is_core() {
        let config = SceneConfig::default();
        assert_eq!(config.classify(8, 8, 8), Material::SemiSolid);
    }

    #[test]
    fn face_center_is_window() {
        // (0, 8, 8): on the min-x wall but inside the window band on
        // the yz pair, so the opening wins over the wall.
        let config = SceneConfig::default();
        assert_eq!(config.classify(0, 8, 8), Material::Void);
    }

    #[test]
    fn cells_outside_every_band_are_solid_wall() {
        let config = SceneConfig::default();
        // Glass band at r=0.875 spans [1, 14]; index 0 sits outside
        // it on every pair for these cells.
        assert_eq!(config.classify(0, 0, 0), Material::Solid);
        assert_eq!(config.classify(0, 0, 1), Material::Solid);
        assert_eq!(config.classify(15, 15, 0), Material::Solid);
    }

    #[test]
    fn wall_cells_inside_glass_band_become_panes() {
        // (0, 1, 1): both y and z sit inside the glass band [1, 14],
        // so the yz pair test passes and the cell is a pane rather
        // than solid frame.
        let config = SceneConfig::default();
        assert_eq!(config.classify(0, 1, 1), Material::Glass);
        assert_eq!(config.classify(0, 2, 5), Material::Glass);
    }

    #[test]
    fn far_face_doorway_is_open() {
        let config = SceneConfig::default();
        // (2, 2, 15): wall on the far z face, inside the glass band
        // on the xy pair, carved open by the doorway rule.
        assert_eq!(config.classify(2, 2, 15), Material::Void);

        let closed = SceneConfig {
            open_far_face: false,
            ..config
        };
        assert_eq!(closed.classify(2, 2, 15), Material::Glass);
    }

    #[test]
    fn near_face_stays_glazed() {
        let config = SceneConfig::default();
        assert_eq!(config.classify(2, 2, 0), Material::Glass);
    }

    #[test]
    fn interior_off_axis_cell_is_air() {
        let config = SceneConfig::default();
        assert_eq!(config.classify(3, 11, 4), Material::Void);
    }

    #[test]
    fn core_is_symmetric_under_axis_permutation() {
        let config = SceneConfig::default();
        let n = config.voxel_count;
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let core = config.classify(x, y, z) == Material::SemiSolid;
                    for (a, b, c) in [(x, z, y), (y, x, z), (z, y, x)] {
                        assert_eq!(
                            core,
                            config.classify(a, b, c) == Material::SemiSolid,
                            "core membership differs under permutation at ({x},{y},{z})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn windows_cut_through_regardless_of_depth() {
        let config = SceneConfig::default();
        let n = config.voxel_count;
        for y in 0..n {
            for z in 0..n {
                if !config.in_band2(y, z, config.window_ratio) {
                    continue;
                }
                for x in 0..n {
                    let material = config.classify(x, y, z);
                    assert!(
                        material == Material::Void || material == Material::SemiSolid,
                        "window column blocked at ({x},{y},{z}): {material:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn classification_is_pure() {
        let config = SceneConfig::default();
        for _ in 0..2 {
            assert_eq!(config.classify(5, 0, 9), config.classify(5, 0, 9));
        }
    }
}
