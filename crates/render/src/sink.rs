use glam::{Mat4, Vec3};
use std::collections::BTreeMap;

/// A sink accepting named shader inputs of known types.
///
/// Scene and camera publish through this trait and never see the
/// graphics API. Implementations decide what a name means; writes to
/// names a sink does not recognize are skipped, not errors.
pub trait UniformSink {
    fn set_f32(&mut self, name: &str, value: f32);
    fn set_i32(&mut self, name: &str, value: i32);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_mat4(&mut self, name: &str, value: Mat4);
}

/// One recorded uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    F32(f32),
    I32(i32),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// In-memory sink that records every write, keyed by uniform name.
///
/// Used by tests to assert on exactly what a producer published, and
/// by headless tooling to inspect shader inputs without a GPU.
#[derive(Debug, Default)]
pub struct RecordingSink {
    values: BTreeMap<String, UniformValue>,
    writes: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value written under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(UniformValue::F32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        match self.values.get(name) {
            Some(UniformValue::I32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_vec3(&self, name: &str) -> Option<Vec3> {
        match self.values.get(name) {
            Some(UniformValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_mat4(&self, name: &str) -> Option<Mat4> {
        match self.values.get(name) {
            Some(UniformValue::Mat4(m)) => Some(*m),
            _ => None,
        }
    }

    /// Number of distinct uniform names seen so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of writes, counting repeated names.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl UniformSink for RecordingSink {
    fn set_f32(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_owned(), UniformValue::F32(value));
        self.writes += 1;
    }

    fn set_i32(&mut self, name: &str, value: i32) {
        self.values.insert(name.to_owned(), UniformValue::I32(value));
        self.writes += 1;
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.values.insert(name.to_owned(), UniformValue::Vec3(value));
        self.writes += 1;
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.values.insert(name.to_owned(), UniformValue::Mat4(value));
        self.writes += 1;
    }
}
