//! Procedural voxel scene for the vitrine raymarcher.
//!
//! Classifies every cell of a cubic grid into a [`Material`] — a
//! hollow box with window openings, glass panes, an open doorway on
//! the far face, and a glowing core at the center — and publishes the
//! result to the renderer as a byte volume plus three scalar shader
//! parameters.
//!
//! # Invariants
//! - Grid dimensions are fixed at N³ for the process lifetime; the
//!   grid is generated once and never mutated or read back.
//! - Classification is a pure function of `(x, y, z)` and the
//!   [`SceneConfig`]; no hidden state.
//! - Indexing convention: cell `(x, y, z)` lives at `x + N*(y + N*z)`
//!   (x fastest), which is also the byte order of the 3D texture
//!   upload.

mod config;
mod grid;
mod material;

pub use config::{SceneConfig, SceneError};
pub use grid::VoxelGrid;
pub use material::Material;
