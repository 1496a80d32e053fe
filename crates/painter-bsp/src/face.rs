//! Planar convex faces, the unit of work of the BSP tree.

use nalgebra::{Point3, Vector3, Vector4};

use crate::{Classification, Plane3D, PlaneSide, Position, Rgb, ShapeId};

/// A homogeneous vertex `(x, y, z, w)`. Stored geometry always has `w = 1`.
pub type Vertex = Vector4<f32>;

/// Builds a vertex with `w = 1`.
#[inline]
pub fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vector4::new(x, y, z, 1.0)
}

/// A convex polygon in 3D space together with its plane.
///
/// Vertices should be coplanar and wound consistently; the plane normal is
/// derived from the first three by the right-hand rule. `source` records
/// which scene object the face came from and never owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    vertices: Vec<Vertex>,
    color: Rgb,
    source: Option<ShapeId>,
    plane: Plane3D,
}

impl Face {
    /// Creates a face from an ordered vertex list.
    ///
    /// Collinear leading vertices are accepted and yield a degenerate plane.
    ///
    /// # Panics
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<Vertex>, color: Rgb, source: Option<ShapeId>) -> Self {
        assert!(vertices.len() >= 3, "Face must have at least 3 vertices");
        let plane = Plane3D::from_three_points(
            vertices[0].position(),
            vertices[1].position(),
            vertices[2].position(),
        );
        Self {
            vertices,
            color,
            source,
            plane,
        }
    }

    /// Returns the vertices of the face.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed face.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// The scene object this face (or the face it was split from) belongs to.
    #[inline]
    pub fn source(&self) -> Option<ShapeId> {
        self.source
    }

    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Unit normal of the face (zero for a degenerate face).
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    /// Signed distance of `point` from the face's plane.
    #[inline]
    pub fn classify<P: Position>(&self, point: &P) -> f32 {
        self.plane.signed_distance(point)
    }

    /// Returns `dot(normal, eye - v0)`, positive when the face points at `eye`.
    pub fn facing(&self, eye: &Point3<f32>) -> f32 {
        self.normal().dot(&(*eye - self.vertices[0].position()))
    }

    /// Mean of the vertex positions.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|v| v.xyz()).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Classifies this face relative to a plane.
    pub fn classify_against(&self, plane: &Plane3D) -> Classification {
        let mut front = 0;
        let mut back = 0;

        for vertex in &self.vertices {
            match plane.classify_point(vertex) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => {}
            }
        }

        match (front, back) {
            (0, 0) => Classification::Coplanar,
            (_, 0) => Classification::Front,
            (0, _) => Classification::Back,
            _ => Classification::Spanning,
        }
    }

    /// Builds a fragment of this face from new vertices, keeping colour and source.
    pub(crate) fn fragment(&self, vertices: Vec<Vertex>) -> Self {
        Self::new(vertices, self.color, self.source)
    }
}
