//! 4x4 homogeneous transform builders. Angles are in degrees.

use nalgebra::{Matrix4, Point3, Vector3};

#[inline]
pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(offset)
}

#[inline]
pub fn scale_matrix(scale: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_nonuniform_scaling(scale)
}

pub fn x_rotation(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(&Vector3::x_axis(), degrees.to_radians())
}

pub fn y_rotation(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(&Vector3::y_axis(), degrees.to_radians())
}

pub fn z_rotation(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(&Vector3::z_axis(), degrees.to_radians())
}

/// `Rz · Rx · Ry` for `(x, y, z)` angles: yaw first, then pitch, then roll.
pub fn rotation_matrix(angles: &Vector3<f32>) -> Matrix4<f32> {
    z_rotation(angles.z) * x_rotation(angles.x) * y_rotation(angles.y)
}

/// Model matrix `T · R · S`: scale, then rotate, then translate.
pub fn model_matrix(
    position: &Vector3<f32>,
    rotation: &Vector3<f32>,
    scale: &Vector3<f32>,
) -> Matrix4<f32> {
    translation_matrix(position) * rotation_matrix(rotation) * scale_matrix(scale)
}

/// View matrix for a camera at `position` with `(pitch, yaw, roll)` rotation.
///
/// The world is first translated by `-position`, then rotated by the negated
/// angles: `Rz(-roll) · Rx(-pitch) · Ry(-yaw) · T(-position)`.
pub fn view_matrix(position: &Point3<f32>, rotation: &Vector3<f32>) -> Matrix4<f32> {
    rotation_matrix(&-rotation) * translation_matrix(&-position.coords)
}
