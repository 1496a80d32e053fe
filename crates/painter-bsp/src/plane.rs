//! Plane representation and point classification.

use nalgebra::{Point3, Vector3, Vector4};

/// Points within this distance of a plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

impl PlaneSide {
    /// Returns the side as `+1`, `-1` or `0`.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            PlaneSide::Front => 1,
            PlaneSide::Back => -1,
            PlaneSide::OnPlane => 0,
        }
    }
}

/// Classification of a whole face relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex is behind the plane (some may lie on it)
    Front,
    /// No vertex is in front of the plane (some may lie on it)
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// Vertices are on both sides
    Spanning,
}

/// Anything that can be reduced to a 3D point for classification.
///
/// Homogeneous vertices are stripped to their `xyz` part; `w` is ignored.
pub trait Position {
    fn position(&self) -> Point3<f32>;
}

impl Position for Point3<f32> {
    #[inline]
    fn position(&self) -> Point3<f32> {
        *self
    }
}

impl Position for Vector3<f32> {
    #[inline]
    fn position(&self) -> Point3<f32> {
        Point3::from(*self)
    }
}

impl Position for Vector4<f32> {
    #[inline]
    fn position(&self) -> Point3<f32> {
        Point3::from(self.xyz())
    }
}

/// A plane in 3D space, represented as `normal · point + d = 0`.
///
/// The normal is unit length, except for planes derived from degenerate
/// (collinear) input where it stays zero and every point classifies as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    d: f32,
}

impl Plane3D {
    /// Creates a plane from a normal vector and offset.
    /// Both are rescaled so the normal has unit length; a zero normal is kept as is.
    pub fn new(normal: Vector3<f32>, d: f32) -> Self {
        let norm = normal.norm();
        if norm > 0.0 {
            Self {
                normal: normal / norm,
                d: d / norm,
            }
        } else {
            Self { normal, d }
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        let unit_normal = if norm > 0.0 { normal / norm } else { normal };
        Self {
            normal: unit_normal,
            d: -unit_normal.dot(&point.coords),
        }
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let ab = b - a;
        let ac = c - a;
        Self::from_point_and_normal(a, ab.cross(&ac))
    }

    /// Returns the normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the `d` coefficient of `a·x + b·y + c·z + d = 0`.
    #[inline]
    pub fn d(&self) -> f32 {
        self.d
    }

    /// Returns the plane as `(a, b, c, d)`.
    #[inline]
    pub fn coefficients(&self) -> Vector4<f32> {
        Vector4::new(self.normal.x, self.normal.y, self.normal.z, self.d)
    }

    /// Returns `true` if the plane was built from collinear points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared() == 0.0
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance<P: Position>(&self, point: &P) -> f32 {
        self.normal.dot(&point.position().coords) + self.d
    }

    /// Classifies which side of the plane a point lies on, using `PLANE_EPSILON`.
    #[inline]
    pub fn classify_point<P: Position>(&self, point: &P) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon<P: Position>(&self, point: &P, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist.abs() < epsilon {
            PlaneSide::OnPlane
        } else if dist > 0.0 {
            PlaneSide::Front
        } else {
            PlaneSide::Back
        }
    }

    /// Intersects the segment `start -> end` with the plane.
    ///
    /// Only meaningful when the endpoints lie strictly on opposite sides.
    /// Both endpoints are treated as `w = 1`; the result is a homogeneous
    /// point with `w = 1`.
    pub fn intersect_segment(&self, start: &Vector4<f32>, end: &Vector4<f32>) -> Vector4<f32> {
        let d_start = self.signed_distance(start);
        let d_end = self.signed_distance(end);
        let t = d_start / (d_start - d_end);
        let a = start.xyz();
        let p = a + (end.xyz() - a) * t;
        Vector4::new(p.x, p.y, p.z, 1.0)
    }
}
