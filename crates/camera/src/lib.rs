//! Orbit camera for the vitrine viewer.
//!
//! The camera orbits a fixed target (the scene center) parameterized
//! by yaw, pitch, and zoom distance. Input handlers mutate those
//! three values; the derived camera-to-world matrix and view
//! reference point have no identity of their own and are republished
//! through a [`UniformSink`] whenever the state changes.
//!
//! # Invariants
//! - Pitch is hard-clamped to ±0.499π; no wrap-around, no gimbal flip.
//! - Zoom has a hard floor and no ceiling.
//! - Camera motion never touches scene state; the only output is the
//!   pair of published uniforms.

mod orbit;

pub use orbit::OrbitCamera;
