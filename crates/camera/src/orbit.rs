use glam::{Mat3, Mat4, Vec3};
use vitrine_render::UniformSink;

/// Yaw/pitch change per pixel of drag, in radians.
const ROTATE_RATE: f32 = 0.01;

/// Pitch ceiling just short of straight up/down, so the look-at basis
/// never degenerates.
const MAX_PITCH: f32 = 0.499 * std::f32::consts::PI;

/// Hard zoom floor; prevents a zero-distance camera.
const MIN_ZOOM: f32 = 0.01;

/// View reference point offset, backward from the camera in view
/// space. The shader uses it as its ray-origin hint.
const VIEW_OFFSET: f32 = 3.0;

/// Interactive orbit state around a fixed target point.
///
/// All fields are mutated only through the input operations; derived
/// matrices are recomputed on demand and published on every change.
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    /// Last-seen drag cursor position; delta base for the next drag.
    anchor: (f32, f32),
    /// Scene center the camera orbits and looks at. Constant.
    target: Vec3,
    /// Zoom units per second while a zoom key is held.
    zoom_rate: f32,
}

impl OrbitCamera {
    /// Camera for a scene of `voxel_count` cells of `voxel_width`
    /// each: target at the scene center, zoom at a fixed multiple of
    /// the grid extent, yaw and pitch zero. Call [`publish`] once
    /// after construction to push the initial matrices.
    ///
    /// [`publish`]: OrbitCamera::publish
    pub fn new(voxel_count: u32, voxel_width: f32) -> Self {
        let extent = voxel_count as f32 * voxel_width;
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: 2.5 * extent,
            anchor: (0.0, 0.0),
            target: Vec3::splat(0.5 * extent),
            zoom_rate: 0.25 * extent,
        }
    }

    /// Start from a non-default orientation. Pitch is clamped.
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self
    }

    /// Start from a non-default zoom distance.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Per-frame zoom integration. `dt` is the wall-clock delta since
    /// the previous tick, keeping the zoom rate frame-rate
    /// independent. Zoom-in wins when both keys are held. Matrices
    /// are republished only when the zoom actually changed.
    pub fn on_tick(&mut self, dt: f32, zoom_in: bool, zoom_out: bool, sink: &mut impl UniformSink) {
        let previous = self.zoom;
        if zoom_in {
            self.zoom = (self.zoom - self.zoom_rate * dt).max(MIN_ZOOM);
        } else if zoom_out {
            self.zoom += self.zoom_rate * dt;
        }
        if self.zoom != previous {
            self.publish(sink);
        }
    }

    /// Record the drag anchor. No recompute, nothing published.
    pub fn on_press_start(&mut self, x: f32, y: f32) {
        self.anchor = (x, y);
    }

    /// Rotate by the cursor delta since the anchor: dragging right
    /// yaws left, dragging up increases pitch, which swings the
    /// camera below the target so the view tilts upward. The anchor
    /// moves to the new cursor position; a zero-delta drag leaves the
    /// angles alone.
    pub fn on_drag(&mut self, x: f32, y: f32, sink: &mut impl UniformSink) {
        let (ax, ay) = self.anchor;
        self.yaw -= ROTATE_RATE * (x - ax);
        self.pitch = (self.pitch + ROTATE_RATE * (ay - y)).clamp(-MAX_PITCH, MAX_PITCH);
        self.anchor = (x, y);
        self.publish(sink);
    }

    /// Camera position in world space.
    ///
    /// The world "backward" direction (+Z) is yawed about world up,
    /// then pitched about the sideways axis of the yawed frame, then
    /// scaled by the zoom distance out from the target.
    pub fn position(&self) -> Vec3 {
        let yawed = Mat3::from_rotation_y(self.yaw);
        let sideways = (yawed * Vec3::NEG_Z).cross(Vec3::Y);
        let backward = Mat3::from_axis_angle(sideways, self.pitch) * (yawed * Vec3::Z);
        self.target + self.zoom * backward
    }

    /// Inverse of the look-at transform from the camera position to
    /// the target, with world up as reference.
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y).inverse()
    }

    /// View reference point: a fixed small distance backward from the
    /// camera, expressed in world space.
    pub fn view_pos(&self) -> Vec3 {
        self.camera_to_world()
            .transform_point3(Vec3::new(0.0, 0.0, VIEW_OFFSET))
    }

    /// Push the derived matrices to the render program.
    pub fn publish(&self, sink: &mut impl UniformSink) {
        sink.set_mat4("camera_to_world_matrix", self.camera_to_world());
        sink.set_vec3("view_pos", self.view_pos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_render::RecordingSink;

    const EPS: f32 = 1e-3;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(16, 1.0)
    }

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPS, "{a} != {b}");
    }

    #[test]
    fn initial_state_sits_behind_the_target() {
        let cam = camera();
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.zoom(), 40.0);
        // Zero yaw and pitch: straight out along +Z from the center.
        assert_vec3_near(cam.position(), Vec3::new(8.0, 8.0, 8.0 + 40.0));
    }

    #[test]
    fn horizontal_drag_changes_yaw_exactly() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_press_start(200.0, 300.0);
        cam.on_drag(300.0, 300.0, &mut sink);

        assert_eq!(cam.yaw(), -ROTATE_RATE * 100.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn dragging_up_increases_pitch() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_press_start(0.0, 100.0);
        cam.on_drag(0.0, 40.0, &mut sink);

        assert_eq!(cam.pitch(), ROTATE_RATE * 60.0);
        // Positive pitch swings the camera under the target.
        assert!(cam.position().y < 8.0);
    }

    #[test]
    fn pitch_is_clamped_even_for_one_extreme_drag() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_press_start(0.0, 0.0);
        cam.on_drag(0.0, -100_000.0, &mut sink);
        assert_eq!(cam.pitch(), MAX_PITCH);

        cam.on_press_start(0.0, 0.0);
        cam.on_drag(0.0, 1_000_000.0, &mut sink);
        assert_eq!(cam.pitch(), -MAX_PITCH);
    }

    #[test]
    fn zero_delta_drag_is_a_no_op_that_moves_the_anchor() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_press_start(10.0, 10.0);
        cam.on_drag(10.0, 10.0, &mut sink);
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);

        // The anchor followed the cursor: the next drag is measured
        // from (10, 10), not from the press point.
        cam.on_drag(20.0, 10.0, &mut sink);
        assert_eq!(cam.yaw(), -ROTATE_RATE * 10.0);
    }

    #[test]
    fn zoom_in_stops_at_the_floor() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        for _ in 0..10_000 {
            cam.on_tick(0.016, true, false, &mut sink);
        }
        assert_eq!(cam.zoom(), MIN_ZOOM);
    }

    #[test]
    fn zoom_starting_below_the_floor_is_lifted_to_it() {
        let mut cam = camera().with_zoom(0.001);
        let mut sink = RecordingSink::new();
        cam.on_tick(0.016, true, false, &mut sink);
        assert_eq!(cam.zoom(), MIN_ZOOM);
    }

    #[test]
    fn zoom_out_has_no_ceiling() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        for _ in 0..1_000 {
            cam.on_tick(1.0, false, true, &mut sink);
        }
        assert!(cam.zoom() > 1_000.0);
    }

    #[test]
    fn zoom_in_wins_when_both_keys_are_held() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_tick(1.0, true, true, &mut sink);
        assert!(cam.zoom() < 40.0);
    }

    #[test]
    fn tick_without_zoom_change_publishes_nothing() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();

        cam.on_tick(0.016, false, false, &mut sink);
        assert_eq!(sink.write_count(), 0);

        // Parked on the floor: holding zoom-in changes nothing.
        let mut cam = camera().with_zoom(MIN_ZOOM);
        cam.on_tick(0.016, true, false, &mut sink);
        assert_eq!(sink.write_count(), 0);
    }

    #[test]
    fn camera_keeps_the_zoom_distance_from_the_target() {
        let mut cam = camera();
        let mut sink = RecordingSink::new();
        cam.on_press_start(0.0, 0.0);
        cam.on_drag(123.0, -77.0, &mut sink);

        let distance = (cam.position() - Vec3::splat(8.0)).length();
        assert!((distance - cam.zoom()).abs() < EPS);
    }

    #[test]
    fn matrix_places_the_camera_looking_at_the_target() {
        let mut cam = camera().with_orientation(0.7, -0.3);
        let mut sink = RecordingSink::new();
        cam.on_tick(2.0, true, false, &mut sink);

        let ctw = cam.camera_to_world();
        // Matrix origin is the camera position.
        assert_vec3_near(ctw.transform_point3(Vec3::ZERO), cam.position());
        // View-space forward (-Z) maps onto the direction to the target.
        let forward = ctw.transform_vector3(Vec3::NEG_Z).normalize();
        let to_target = (Vec3::splat(8.0) - cam.position()).normalize();
        assert_vec3_near(forward, to_target);
    }

    #[test]
    fn view_pos_sits_the_fixed_offset_behind_the_camera() {
        let cam = camera().with_orientation(-1.2, 0.9);
        let gap = (cam.view_pos() - cam.position()).length();
        assert!((gap - VIEW_OFFSET).abs() < EPS);
    }

    #[test]
    fn publish_writes_both_camera_uniforms() {
        let cam = camera();
        let mut sink = RecordingSink::new();
        cam.publish(&mut sink);

        assert!(sink.get_mat4("camera_to_world_matrix").is_some());
        assert!(sink.get_vec3("view_pos").is_some());
        assert_eq!(sink.len(), 2);
    }
}
