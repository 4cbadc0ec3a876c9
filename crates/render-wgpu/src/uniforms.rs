use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use vitrine_render::UniformSink;

/// GPU-side layout of the shader's uniform block. Field order and
/// padding must match `SceneUniforms` in the WGSL source.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub camera_to_world: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub voxel_density: f32,
    pub voxel_width: f32,
    pub voxel_count: i32,
    pub screen_ratio: f32,
    pub _pad: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            camera_to_world: Mat4::IDENTITY.to_cols_array_2d(),
            view_pos: [0.0; 3],
            voxel_density: 1.0,
            voxel_width: 1.0,
            voxel_count: 0,
            screen_ratio: 1.0,
            _pad: 0.0,
        }
    }
}

/// CPU mirror of the uniform block, addressed by uniform name.
///
/// Scene and camera write here through [`UniformSink`]; the renderer
/// flushes the block to its uniform buffer when dirty. Writes to
/// names the block does not carry are warned about and skipped — the
/// shader keeps seeing the previous values.
#[derive(Debug, Default)]
pub struct UniformBlock {
    data: SceneUniforms,
    dirty: bool,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self {
            data: SceneUniforms::default(),
            dirty: true,
        }
    }

    pub(crate) fn data(&self) -> &SceneUniforms {
        &self.data
    }

    /// True if a write landed since the last [`mark_clean`].
    ///
    /// [`mark_clean`]: UniformBlock::mark_clean
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn unknown(name: &str, kind: &str) {
        tracing::warn!(name, kind, "unknown uniform; update skipped");
    }
}

impl UniformSink for UniformBlock {
    fn set_f32(&mut self, name: &str, value: f32) {
        match name {
            "voxel_density" => self.data.voxel_density = value,
            "voxel_width" => self.data.voxel_width = value,
            "screen_ratio" => self.data.screen_ratio = value,
            _ => return Self::unknown(name, "f32"),
        }
        self.dirty = true;
    }

    fn set_i32(&mut self, name: &str, value: i32) {
        match name {
            "voxel_count" => self.data.voxel_count = value,
            _ => return Self::unknown(name, "i32"),
        }
        self.dirty = true;
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        match name {
            "view_pos" => self.data.view_pos = value.to_array(),
            _ => return Self::unknown(name, "vec3"),
        }
        self.dirty = true;
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        match name {
            "camera_to_world_matrix" => self.data.camera_to_world = value.to_cols_array_2d(),
            _ => return Self::unknown(name, "mat4"),
        }
        self.dirty = true;
    }
}
