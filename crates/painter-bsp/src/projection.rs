//! World to screen mapping: view, perspective and viewport transforms.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point2, Vector3, Vector4};

use crate::{Camera, Cuttable, Face, Plane3D, Vertex};

/// Builds a perspective matrix from a vertical field of view in degrees.
///
/// ```text
/// [ f/aspect  0   0   0 ]
/// [ 0         f   0   0 ]
/// [ 0         0   a   b ]
/// [ 0         0  -1   0 ]
/// ```
///
/// with `f = 1 / tan(fov / 2)`, `a = -(far + near) / (far - near)` and
/// `b = -2 far near / (far - near)`.
pub fn perspective_matrix(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = 1.0 / (fov.to_radians() / 2.0).tan();
    let a = -(far + near) / (far - near);
    let b = -(2.0 * far * near) / (far - near);

    #[rustfmt::skip]
    let m = Matrix4::new(
        f / aspect, 0.0,  0.0, 0.0,
        0.0,        f,    0.0, 0.0,
        0.0,        0.0,  a,   b,
        0.0,        0.0, -1.0, 0.0,
    );
    m
}

/// Whether faces crossing the near plane are clipped before projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearClip {
    /// Partially visible faces are projected with raw, unclipped vertices.
    #[default]
    Disabled,
    /// The camera-space face is cut at `z = near` and only the part in
    /// front of the plane is projected.
    Enabled,
}

impl fmt::Display for NearClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NearClip::Disabled => "off",
            NearClip::Enabled => "on",
        })
    }
}

impl FromStr for NearClip {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "false" | "disabled" => Ok(NearClip::Disabled),
            "on" | "true" | "enabled" => Ok(NearClip::Enabled),
            _ => Err(format!("unknown near clip mode `{s}` (expected on or off)")),
        }
    }
}

/// A snapshot of the camera's transforms for one frame.
#[derive(Debug, Clone)]
pub struct Projection {
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    width: f32,
    height: f32,
    near: f32,
}

impl Projection {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view: *camera.view_matrix(),
            projection: perspective_matrix(
                camera.fov(),
                camera.aspect(),
                camera.near(),
                camera.far(),
            ),
            width: camera.width(),
            height: camera.height(),
            near: camera.near(),
        }
    }

    #[inline]
    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view
    }

    #[inline]
    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// World vertex to camera space.
    #[inline]
    pub fn to_camera_space(&self, vertex: &Vertex) -> Vector4<f32> {
        self.view * vertex
    }

    /// Camera-space vertex to pixel coordinates.
    ///
    /// A clip-space `w` of exactly zero skips the perspective divide.
    pub fn camera_to_screen(&self, camera_space: &Vector4<f32>) -> Point2<f32> {
        let clip = self.projection * camera_space;
        let ndc = if clip.w != 0.0 { clip / clip.w } else { clip };

        Point2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - (ndc.y + 1.0) * 0.5) * self.height,
        )
    }

    /// World vertex to pixel coordinates.
    #[inline]
    pub fn to_screen(&self, vertex: &Vertex) -> Point2<f32> {
        self.camera_to_screen(&self.to_camera_space(vertex))
    }

    /// Projects a world-space face to screen points.
    ///
    /// Returns `None` when every vertex has camera-space `z <= 0`, or when
    /// near clipping is enabled and nothing is left in front of the near
    /// plane.
    pub fn project_face(&self, face: &Face, near_clip: NearClip) -> Option<Vec<Point2<f32>>> {
        let camera_space: Vec<Vector4<f32>> =
            face.vertices().iter().map(|v| self.to_camera_space(v)).collect();

        if camera_space.iter().all(|v| v.z <= 0.0) {
            return None;
        }

        let visible = match near_clip {
            NearClip::Disabled => camera_space,
            NearClip::Enabled => {
                let near_plane = Plane3D::new(Vector3::z(), -self.near);
                let (front, _) = face.fragment(camera_space).cut(&near_plane);
                front?.vertices().to_vec()
            }
        };

        Some(visible.iter().map(|v| self.camera_to_screen(v)).collect())
    }
}
