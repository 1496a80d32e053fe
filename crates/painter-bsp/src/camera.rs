//! First-person camera with a cached view matrix.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::view_matrix;

/// Pitch is clamped to this many degrees either side of level.
pub const PITCH_LIMIT: f32 = 179.0;

/// Viewpoint for traversal and projection.
///
/// Rotation is `(pitch, yaw, roll)` in degrees. At zero rotation the camera
/// sits at its position looking down +Z. Every mutator recomputes the view
/// matrix, so [`Camera::view_matrix`] is always current.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3<f32>,
    rotation: Vector3<f32>,
    fov: f32,
    near: f32,
    far: f32,
    width: f32,
    height: f32,
    aspect: f32,
    view: Matrix4<f32>,
}

impl Default for Camera {
    /// 1024x768 viewport, 90° vertical field of view, clip planes 0.1 and 100.
    fn default() -> Self {
        Self::new(1024.0, 768.0, 90.0, 0.1, 100.0)
    }
}

impl Camera {
    /// Creates a camera at the origin with zero rotation.
    ///
    /// `fov` is the vertical field of view in degrees.
    pub fn new(width: f32, height: f32, fov: f32, near: f32, far: f32) -> Self {
        let position = Point3::origin();
        let rotation = Vector3::zeros();
        Self {
            position,
            rotation,
            fov,
            near,
            far,
            width,
            height,
            aspect: width / height,
            view: view_matrix(&position, &rotation),
        }
    }

    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// `(pitch, yaw, roll)` in degrees.
    #[inline]
    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// World-to-camera transform for the current position and rotation.
    #[inline]
    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view
    }

    /// Moves the camera to an absolute world position.
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.update_view();
    }

    /// Adds `(pitch, yaw, roll)` degrees to the rotation.
    ///
    /// Pitch is clamped to `[-179, 179]`, yaw wraps into `[0, 360)` and roll
    /// is left unconstrained.
    pub fn rotate(&mut self, delta: Vector3<f32>) {
        self.rotation += delta;
        self.rotation.x = self.rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.rotation.y = wrap_degrees(self.rotation.y);
        self.update_view();
    }

    /// Moves along the camera's local axes: `(right, up, forward)`.
    ///
    /// Forward follows both pitch and yaw, right follows yaw only, and up is
    /// perpendicular to both. At zero rotation forward is `-Z`.
    pub fn translate_local(&mut self, delta: Vector3<f32>) {
        let pitch = self.rotation.x.to_radians();
        let yaw = self.rotation.y.to_radians();

        let forward = Vector3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        );
        let right = Vector3::new(yaw.cos(), 0.0, -yaw.sin());
        let up = right.cross(&forward).normalize();

        self.position += right * delta.x + up * delta.y + forward * delta.z;
        self.update_view();
    }

    /// Moves by a world-space offset.
    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.position += delta;
        self.update_view();
    }

    /// Returns to the origin with zero rotation.
    pub fn reset(&mut self) {
        self.position = Point3::origin();
        self.rotation = Vector3::zeros();
        self.update_view();
    }

    /// Snaps to the nearest cardinal view: level pitch, yaw to a multiple of
    /// 90°, no roll. Yaw exactly between two cardinals goes to the even one
    /// (45° to 0°, 135° to 180°).
    pub fn stabilize(&mut self) {
        let yaw = (self.rotation.y / 90.0).round_ties_even() * 90.0;
        self.rotation = Vector3::new(0.0, wrap_degrees(yaw), 0.0);
        self.update_view();
    }

    /// Sets the vertical field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Resizes the viewport and recomputes the aspect ratio.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.aspect = width / height;
    }

    fn update_view(&mut self) {
        self.view = view_matrix(&self.position, &self.rotation);
    }
}

/// Wraps an angle into `[0, 360)`.
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Point3::origin());
        assert_eq!(camera.rotation(), Vector3::zeros());
        assert_eq!(camera.fov(), 90.0);
        assert_eq!(camera.near(), 0.1);
        assert_eq!(camera.far(), 100.0);
        assert!(approx_eq(camera.aspect(), 1024.0 / 768.0));
        assert_eq!(camera.view_matrix(), &Matrix4::identity());
    }

    #[test]
    fn yaw_wraps() {
        let mut camera = Camera::default();
        camera.rotate(Vector3::new(0.0, 370.0, 0.0));
        assert!(approx_eq(camera.rotation().y, 10.0));

        camera.rotate(Vector3::new(0.0, -30.0, 0.0));
        assert!(approx_eq(camera.rotation().y, 340.0));
    }

    #[test]
    fn pitch_clamps() {
        let mut camera = Camera::default();
        camera.rotate(Vector3::new(200.0, 0.0, 0.0));
        assert_eq!(camera.rotation().x, 179.0);

        camera.rotate(Vector3::new(-500.0, 0.0, 0.0));
        assert_eq!(camera.rotation().x, -179.0);
    }

    #[test]
    fn roll_is_unconstrained() {
        let mut camera = Camera::default();
        camera.rotate(Vector3::new(0.0, 0.0, 400.0));
        assert_eq!(camera.rotation().z, 400.0);
    }

    #[test]
    fn stabilize_snaps_to_cardinal() {
        let mut camera = Camera::default();
        camera.rotate(Vector3::new(20.0, 130.0, 15.0));
        camera.stabilize();
        assert_eq!(camera.rotation(), Vector3::new(0.0, 90.0, 0.0));

        camera.rotate(Vector3::new(0.0, 260.0, 0.0));
        camera.stabilize();
        // 350 rounds to 360, which wraps to 0
        assert_eq!(camera.rotation(), Vector3::zeros());
    }

    #[test]
    fn stabilize_ties_round_to_even_cardinal() {
        for (yaw, expected) in [(45.0, 0.0), (135.0, 180.0), (225.0, 180.0), (315.0, 0.0)] {
            let mut camera = Camera::default();
            camera.rotate(Vector3::new(0.0, yaw, 0.0));
            camera.stabilize();
            assert_eq!(camera.rotation().y, expected, "yaw {yaw}");
        }
    }

    #[test]
    fn translate_local_up_is_perpendicular_to_pitched_forward() {
        let mut camera = Camera::default();
        camera.rotate(Vector3::new(30.0, 90.0, 0.0));

        let (pitch, yaw) = (30f32.to_radians(), 90f32.to_radians());
        let forward = Vector3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        );
        let right = Vector3::new(yaw.cos(), 0.0, -yaw.sin());
        let up = right.cross(&forward).normalize();

        camera.translate_local(Vector3::new(0.0, 2.0, 0.0));
        let moved = camera.position().coords;
        assert!((moved - up * 2.0).norm() < 1e-5);
        assert!(moved.dot(&forward).abs() < 1e-5);
        assert!(moved.dot(&right).abs() < 1e-5);
        // Pitched up 30°: up tilts back against the view direction.
        assert!(approx_eq(moved.y, 2.0 * pitch.cos()));
        assert!(approx_eq(moved.x, 2.0 * pitch.sin()));

        camera.reset();
        camera.rotate(Vector3::new(30.0, 90.0, 0.0));
        camera.translate_local(Vector3::new(0.0, 0.0, 1.0));
        assert!((camera.position().coords - forward).norm() < 1e-5);
    }

    #[test]
    fn translate_local_follows_yaw() {
        let mut camera = Camera::default();
        camera.translate_local(Vector3::new(0.0, 0.0, 1.0));
        assert!((camera.position() - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-5);

        camera.reset();
        camera.rotate(Vector3::new(0.0, 90.0, 0.0));
        camera.translate_local(Vector3::new(1.0, 0.0, 0.0));
        assert!((camera.position() - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn reset_restores_origin() {
        let mut camera = Camera::default();
        camera.translate(Vector3::new(1.0, 2.0, 3.0));
        camera.rotate(Vector3::new(10.0, 20.0, 30.0));
        camera.reset();
        assert_eq!(camera.position(), Point3::origin());
        assert_eq!(camera.rotation(), Vector3::zeros());
        assert_eq!(camera.view_matrix(), &Matrix4::identity());
    }

    #[test]
    fn view_matrix_tracks_position() {
        let mut camera = Camera::default();
        camera.translate(Vector3::new(0.0, 0.0, -5.0));

        let world = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let cam = camera.view_matrix() * world;
        assert!(approx_eq(cam.z, 5.0));
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 800.0);
        assert_eq!(camera.aspect(), 1.0);
        assert_eq!((camera.width(), camera.height()), (800.0, 800.0));
        camera.set_fov(60.0);
        assert_eq!(camera.fov(), 60.0);
    }
}
