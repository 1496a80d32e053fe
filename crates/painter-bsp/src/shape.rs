//! Supported shape kinds and their decomposition into faces.
//!
//! Each kind has a fixed face table (vertex indices per face) and a colour
//! rule. The vertex arrays are already in world space; the constructors here
//! only produce the canonical, untransformed vertex layout for each kind.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point3, Vector3};
use thiserror::Error;

use crate::{Face, Rgb, Vertex, vertex};

/// Non-owning handle to a scene object, used as face provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while building or decomposing shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("unsupported shape kind `{0}`")]
    UnknownKind(String),

    #[error("cylinder needs a segment count")]
    MissingSegments,

    #[error("{kind} face references vertex {index} but the shape has {len} vertices")]
    VertexOutOfRange {
        kind: ShapeKind,
        index: usize,
        len: usize,
    },
}

/// The closed set of supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cuboid,
    Pyramid,
    Prism,
    Cylinder,
    Octahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cuboid,
        ShapeKind::Pyramid,
        ShapeKind::Prism,
        ShapeKind::Cylinder,
        ShapeKind::Octahedron,
    ];
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Cuboid => "cuboid",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Prism => "prism",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Octahedron => "octahedron",
        })
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cuboid" | "box" => Ok(ShapeKind::Cuboid),
            "pyramid" => Ok(ShapeKind::Pyramid),
            "prism" => Ok(ShapeKind::Prism),
            "cylinder" => Ok(ShapeKind::Cylinder),
            "octahedron" => Ok(ShapeKind::Octahedron),
            _ => Err(ShapeError::UnknownKind(s.to_string())),
        }
    }
}

/// Per-kind parameters that are not encoded in the vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeParams {
    pub segments: Option<usize>,
}

const CUBOID_FACES: [&[usize]; 6] = [
    &[0, 1, 3, 2], // front
    &[4, 6, 7, 5], // back
    &[0, 2, 6, 4], // left
    &[1, 5, 7, 3], // right
    &[2, 3, 7, 6], // top
    &[0, 4, 5, 1], // bottom
];

const CUBOID_COLORS: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
];

const PYRAMID_FACES: [&[usize]; 5] = [
    &[0, 1, 2, 3], // base
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

const PYRAMID_COLORS: [Rgb; 5] = [
    Rgb::new(200, 100, 100),
    Rgb::new(100, 200, 100),
    Rgb::new(100, 100, 200),
    Rgb::new(200, 200, 100),
    Rgb::new(200, 100, 200),
];

const PRISM_FACES: [&[usize]; 5] = [
    &[0, 1, 2], // bottom
    &[3, 4, 5], // top
    &[0, 3, 4, 1],
    &[1, 4, 5, 2],
    &[2, 5, 3, 0],
];

const PRISM_COLORS: [Rgb; 5] = [
    Rgb::new(255, 100, 100),
    Rgb::new(100, 255, 100),
    Rgb::new(100, 100, 255),
    Rgb::new(255, 255, 100),
    Rgb::new(255, 100, 255),
];

const OCTAHEDRON_FACES: [&[usize]; 8] = [
    &[0, 2, 4],
    &[0, 4, 3],
    &[0, 3, 5],
    &[0, 5, 2],
    &[1, 2, 4],
    &[1, 4, 3],
    &[1, 3, 5],
    &[1, 5, 2],
];

const CYLINDER_BOTTOM_COLOR: Rgb = Rgb::new(100, 100, 150);
const CYLINDER_TOP_COLOR: Rgb = Rgb::new(150, 100, 100);

/// A shape instance: its kind plus its vertex array (and segment count for
/// cylinders).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Cuboid { vertices: Vec<Vertex> },
    Pyramid { vertices: Vec<Vertex> },
    Prism { vertices: Vec<Vertex> },
    /// `2 * segments` interleaved bottom/top ring vertices, then the bottom
    /// and top cap centres.
    Cylinder { vertices: Vec<Vertex>, segments: usize },
    Octahedron { vertices: Vec<Vertex> },
}

impl Shape {
    /// Axis-aligned box. Vertex `i` has bit 0 = +x, bit 1 = +y, bit 2 = +z.
    pub fn cuboid(sizes: Vector3<f32>, center: Point3<f32>) -> Self {
        let h = sizes / 2.0;
        let vertices = (0..8)
            .map(|i| {
                let sx = if i & 1 == 0 { -h.x } else { h.x };
                let sy = if i & 2 == 0 { -h.y } else { h.y };
                let sz = if i & 4 == 0 { -h.z } else { h.z };
                vertex(center.x + sx, center.y + sy, center.z + sz)
            })
            .collect();
        Shape::Cuboid { vertices }
    }

    /// Square pyramid standing on the xz-plane: 4 base corners, then the apex.
    pub fn pyramid(base_size: f32, height: f32, center: Point3<f32>) -> Self {
        let w = base_size / 2.0;
        let base_y = center.y - height / 2.0;
        let (x, z) = (center.x, center.z);
        Shape::Pyramid {
            vertices: vec![
                vertex(x - w, base_y, z - w),
                vertex(x + w, base_y, z - w),
                vertex(x + w, base_y, z + w),
                vertex(x - w, base_y, z + w),
                vertex(x, center.y + height / 2.0, z),
            ],
        }
    }

    /// Prism with equilateral triangle ends: bottom triangle, then top.
    pub fn prism(side_length: f32, height: f32, center: Point3<f32>) -> Self {
        let tri = 3.0_f32.sqrt() / 2.0 * side_length;
        let s = side_length / 2.0;
        let (x, z) = (center.x, center.z);
        let mut vertices = Vec::with_capacity(6);
        for y in [center.y - height / 2.0, center.y + height / 2.0] {
            vertices.push(vertex(x, y, z + 2.0 * tri / 3.0));
            vertices.push(vertex(x - s, y, z - tri / 3.0));
            vertices.push(vertex(x + s, y, z - tri / 3.0));
        }
        Shape::Prism { vertices }
    }

    /// Cylinder around the y axis approximated by `segments` sides.
    pub fn cylinder(radius: f32, height: f32, segments: usize, center: Point3<f32>) -> Self {
        let half = height / 2.0;
        let mut vertices = Vec::with_capacity(segments * 2 + 2);
        for i in 0..segments {
            let angle = 2.0 * PI * i as f32 / segments as f32;
            let x = center.x + radius * angle.cos();
            let z = center.z + radius * angle.sin();
            vertices.push(vertex(x, center.y - half, z));
            vertices.push(vertex(x, center.y + half, z));
        }
        vertices.push(vertex(center.x, center.y - half, center.z));
        vertices.push(vertex(center.x, center.y + half, center.z));
        Shape::Cylinder { vertices, segments }
    }

    /// Octahedron: top, bottom, right, left, front, back.
    pub fn octahedron(size: f32, center: Point3<f32>) -> Self {
        let (x, y, z) = (center.x, center.y, center.z);
        Shape::Octahedron {
            vertices: vec![
                vertex(x, y + size, z),
                vertex(x, y - size, z),
                vertex(x + size, y, z),
                vertex(x - size, y, z),
                vertex(x, y, z + size),
                vertex(x, y, z - size),
            ],
        }
    }

    /// Builds a shape from an externally supplied `{kind, vertices, params}` record.
    pub fn from_parts(
        kind: ShapeKind,
        vertices: Vec<Vertex>,
        params: ShapeParams,
    ) -> Result<Self, ShapeError> {
        Ok(match kind {
            ShapeKind::Cuboid => Shape::Cuboid { vertices },
            ShapeKind::Pyramid => Shape::Pyramid { vertices },
            ShapeKind::Prism => Shape::Prism { vertices },
            ShapeKind::Cylinder => Shape::Cylinder {
                vertices,
                segments: params.segments.ok_or(ShapeError::MissingSegments)?,
            },
            ShapeKind::Octahedron => Shape::Octahedron { vertices },
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Cuboid { .. } => ShapeKind::Cuboid,
            Shape::Pyramid { .. } => ShapeKind::Pyramid,
            Shape::Prism { .. } => ShapeKind::Prism,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
            Shape::Octahedron { .. } => ShapeKind::Octahedron,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        match self {
            Shape::Cuboid { vertices }
            | Shape::Pyramid { vertices }
            | Shape::Prism { vertices }
            | Shape::Cylinder { vertices, .. }
            | Shape::Octahedron { vertices } => vertices,
        }
    }

    fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        match self {
            Shape::Cuboid { vertices }
            | Shape::Pyramid { vertices }
            | Shape::Prism { vertices }
            | Shape::Cylinder { vertices, .. }
            | Shape::Octahedron { vertices } => vertices,
        }
    }

    pub fn params(&self) -> ShapeParams {
        match self {
            Shape::Cylinder { segments, .. } => ShapeParams {
                segments: Some(*segments),
            },
            _ => ShapeParams::default(),
        }
    }

    /// Returns a copy with every vertex multiplied by `matrix`.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut copy = self.clone();
        for v in copy.vertices_mut() {
            *v = matrix * *v;
        }
        copy
    }

    /// Decomposes the shape into its faces, tagging each with `id`.
    pub fn faces(&self, id: ShapeId) -> Result<Vec<Face>, ShapeError> {
        let kind = self.kind();
        let vertices = self.vertices();
        let face = |indices: &[usize], color: Rgb| -> Result<Face, ShapeError> {
            Ok(Face::new(gather(kind, vertices, indices)?, color, Some(id)))
        };

        match self {
            Shape::Cuboid { .. } => CUBOID_FACES
                .iter()
                .zip(CUBOID_COLORS)
                .map(|(indices, color)| face(*indices, color))
                .collect(),
            Shape::Pyramid { .. } => PYRAMID_FACES
                .iter()
                .zip(PYRAMID_COLORS)
                .map(|(indices, color)| face(*indices, color))
                .collect(),
            Shape::Prism { .. } => PRISM_FACES
                .iter()
                .zip(PRISM_COLORS)
                .map(|(indices, color)| face(*indices, color))
                .collect(),
            Shape::Octahedron { .. } => OCTAHEDRON_FACES
                .iter()
                .enumerate()
                .map(|(i, indices)| face(*indices, Rgb::from_hsv(i as f32 / 8.0, 0.8, 0.9)))
                .collect(),
            Shape::Cylinder { segments, .. } => cylinder_faces(*segments, vertices.len(), face),
        }
    }
}

/// Sides (hue ramp), then bottom cap fan, then top cap fan.
fn cylinder_faces<F>(segments: usize, len: usize, face: F) -> Result<Vec<Face>, ShapeError>
where
    F: Fn(&[usize], Rgb) -> Result<Face, ShapeError>,
{
    let ring = segments * 2;
    // Cap centres are the last two vertices; an underflow maps to an
    // out-of-range index so it is reported like any other short array.
    let bottom_center = len.checked_sub(2).unwrap_or(usize::MAX);
    let top_center = len.checked_sub(1).unwrap_or(usize::MAX);

    let mut faces = Vec::with_capacity(segments * 3);
    for i in 0..segments {
        let (bottom, top) = (i * 2, i * 2 + 1);
        let (next_bottom, next_top) = ((i * 2 + 2) % ring, (i * 2 + 3) % ring);
        let color = Rgb::from_hsv(i as f32 / segments as f32, 0.7, 0.9);
        faces.push(face(&[bottom, next_bottom, next_top, top], color)?);
    }
    for i in 0..segments {
        let (bottom, next_bottom) = (i * 2, (i * 2 + 2) % ring);
        faces.push(face(&[bottom, next_bottom, bottom_center], CYLINDER_BOTTOM_COLOR)?);
    }
    for i in 0..segments {
        let (top, next_top) = (i * 2 + 1, (i * 2 + 3) % ring);
        faces.push(face(&[top, next_top, top_center], CYLINDER_TOP_COLOR)?);
    }
    Ok(faces)
}

fn gather(
    kind: ShapeKind,
    vertices: &[Vertex],
    indices: &[usize],
) -> Result<Vec<Vertex>, ShapeError> {
    indices
        .iter()
        .map(|&index| {
            vertices
                .get(index)
                .copied()
                .ok_or(ShapeError::VertexOutOfRange {
                    kind,
                    index,
                    len: vertices.len(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point3<f32> {
        Point3::origin()
    }

    #[test]
    fn face_counts_per_kind() {
        let id = ShapeId(0);
        let cases = [
            (Shape::cuboid(Vector3::new(1.0, 1.0, 1.0), origin()), 6),
            (Shape::pyramid(1.0, 1.0, origin()), 5),
            (Shape::prism(1.0, 1.0, origin()), 5),
            (Shape::cylinder(1.0, 2.0, 12, origin()), 36),
            (Shape::octahedron(1.0, origin()), 8),
        ];
        for (shape, expected) in cases {
            let faces = shape.faces(id).unwrap();
            assert_eq!(faces.len(), expected, "{}", shape.kind());
            assert!(faces.iter().all(|f| f.source() == Some(id)));
        }
    }

    #[test]
    fn cuboid_vertex_layout_and_palette() {
        let shape = Shape::cuboid(Vector3::new(2.0, 4.0, 6.0), Point3::new(0.0, 0.0, 5.0));
        let v = shape.vertices();
        assert_eq!(v[0], vertex(-1.0, -2.0, 2.0));
        assert_eq!(v[3], vertex(1.0, 2.0, 2.0));
        assert_eq!(v[7], vertex(1.0, 2.0, 8.0));

        let faces = shape.faces(ShapeId(3)).unwrap();
        let colors: Vec<Rgb> = faces.iter().map(Face::color).collect();
        assert_eq!(colors, CUBOID_COLORS.to_vec());
        assert!(faces.iter().all(|f| f.len() == 4));
    }

    #[test]
    fn cuboid_normals_point_inwards() {
        let center = Point3::new(0.0, 0.0, 5.0);
        let shape = Shape::cuboid(Vector3::new(1.0, 1.0, 1.0), center);
        for face in shape.faces(ShapeId(0)).unwrap() {
            assert!(face.classify(&center) > 0.0);
        }
    }

    #[test]
    fn pyramid_base_and_apex() {
        let shape = Shape::pyramid(2.0, 4.0, Point3::new(1.0, 0.0, 0.0));
        let v = shape.vertices();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], vertex(0.0, -2.0, -1.0));
        assert_eq!(v[4], vertex(1.0, 2.0, 0.0));
        let faces = shape.faces(ShapeId(0)).unwrap();
        assert_eq!(faces[0].len(), 4);
        assert!(faces[1..].iter().all(|f| f.len() == 3));
    }

    #[test]
    fn prism_has_two_triangles_and_three_quads() {
        let faces = Shape::prism(1.0, 1.5, origin()).faces(ShapeId(0)).unwrap();
        let sizes: Vec<usize> = faces.iter().map(Face::len).collect();
        assert_eq!(sizes, vec![3, 3, 4, 4, 4]);
    }

    #[test]
    fn cylinder_layout_and_colors() {
        let shape = Shape::cylinder(1.0, 2.0, 4, origin());
        assert_eq!(shape.vertices().len(), 10);
        assert_eq!(shape.vertices()[8], vertex(0.0, -1.0, 0.0));
        assert_eq!(shape.vertices()[9], vertex(0.0, 1.0, 0.0));
        assert_eq!(shape.params().segments, Some(4));

        let faces = shape.faces(ShapeId(0)).unwrap();
        assert_eq!(faces.len(), 12);
        assert_eq!(faces[0].color(), Rgb::from_hsv(0.0, 0.7, 0.9));
        assert_ne!(faces[0].color(), faces[1].color());
        assert!(faces[4..8].iter().all(|f| f.color() == CYLINDER_BOTTOM_COLOR));
        assert!(faces[8..].iter().all(|f| f.color() == CYLINDER_TOP_COLOR));
        // Last side wraps around to the first ring vertices.
        assert_eq!(faces[3].vertices()[1], shape.vertices()[0]);
        assert_eq!(faces[3].vertices()[2], shape.vertices()[1]);
    }

    #[test]
    fn octahedron_hue_ramp() {
        let faces = Shape::octahedron(1.0, origin()).faces(ShapeId(0)).unwrap();
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.color(), Rgb::from_hsv(i as f32 / 8.0, 0.8, 0.9));
        }
    }

    #[test]
    fn too_few_vertices_is_reported() {
        let shape = Shape::Pyramid {
            vertices: vec![vertex(0.0, 0.0, 0.0); 4],
        };
        assert_eq!(
            shape.faces(ShapeId(0)),
            Err(ShapeError::VertexOutOfRange {
                kind: ShapeKind::Pyramid,
                index: 4,
                len: 4
            })
        );

        let cylinder = Shape::Cylinder {
            vertices: vec![vertex(0.0, 0.0, 0.0)],
            segments: 3,
        };
        assert!(matches!(
            cylinder.faces(ShapeId(0)),
            Err(ShapeError::VertexOutOfRange { .. })
        ));
    }

    #[test]
    fn kind_names_round_trip_and_unknown_fails() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.to_string().parse::<ShapeKind>(), Ok(kind));
        }
        assert_eq!("Box".parse::<ShapeKind>(), Ok(ShapeKind::Cuboid));
        assert_eq!(
            "torus".parse::<ShapeKind>(),
            Err(ShapeError::UnknownKind("torus".to_string()))
        );
    }

    #[test]
    fn from_parts_requires_segments_for_cylinders() {
        let vertices = Shape::cylinder(1.0, 1.0, 6, origin()).vertices().to_vec();
        assert_eq!(
            Shape::from_parts(ShapeKind::Cylinder, vertices.clone(), ShapeParams::default()),
            Err(ShapeError::MissingSegments)
        );
        let shape = Shape::from_parts(
            ShapeKind::Cylinder,
            vertices,
            ShapeParams { segments: Some(6) },
        )
        .unwrap();
        assert_eq!(shape.faces(ShapeId(1)).unwrap().len(), 18);
    }

    #[test]
    fn transformed_leaves_original_untouched() {
        let shape = Shape::octahedron(1.0, origin());
        let moved = shape.transformed(&Matrix4::new_translation(&Vector3::new(0.0, 0.0, 5.0)));
        assert_eq!(shape.vertices()[0], vertex(0.0, 1.0, 0.0));
        assert_eq!(moved.vertices()[0], vertex(0.0, 1.0, 5.0));
        assert_eq!(moved.kind(), ShapeKind::Octahedron);
    }
}
