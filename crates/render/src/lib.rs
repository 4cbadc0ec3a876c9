//! Shader input adapter: renderer-agnostic uniform interface.
//!
//! # Invariants
//! - Producers (scene, camera) never hold a graphics binding; they
//!   only write named values through [`UniformSink`].
//! - An unknown uniform name is the sink's problem, never the
//!   producer's: a sink may warn and skip, it must not panic.
//! - A skipped update leaves the previous value in place.
//!
//! The trait is stable; swap in a GPU implementation without changing
//! producers. [`RecordingSink`] is the non-GPU implementation used by
//! tests and headless tooling.

mod sink;

pub use sink::{RecordingSink, UniformSink, UniformValue};
