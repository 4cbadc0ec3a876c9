//! wgpu render backend for the vitrine viewer.
//!
//! Draws one fullscreen triangle through the raymarch shader. The
//! voxel volume is uploaded once as a 3D byte texture; everything the
//! shader needs per frame arrives through the named-uniform block.
//!
//! # Invariants
//! - The backend never reads results back from the GPU.
//! - Exactly one volume allocation and one bulk upload per process.
//! - An unrecognized uniform name is warned about and skipped; the
//!   previous value stays live until the next successful update.

mod gpu;
mod shaders;
mod texture;
mod uniforms;

pub use gpu::RayMarchRenderer;
pub use texture::VoxelTexture;
pub use uniforms::UniformBlock;
