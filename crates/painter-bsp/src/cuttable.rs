//! Face cutting/splitting operations for BSP trees.

use crate::{Classification, Face, Plane3D, PlaneSide, Vertex};

/// Geometry that can be cut by a plane.
pub trait Cuttable: Sized {
    /// Cuts the geometry by a plane.
    ///
    /// Returns `(front, back)`:
    /// - no vertex behind the plane (coplanar included): `(Some(self), None)`
    /// - no vertex in front of the plane: `(None, Some(self))`
    /// - vertices on both sides: each side with at least 3 vertices becomes a
    ///   new fragment, otherwise that side is `None`
    ///
    /// The one-sided cases hand back `self` unchanged, without rebuilding it.
    fn cut(self, plane: &Plane3D) -> (Option<Self>, Option<Self>);
}

impl Cuttable for Face {
    fn cut(self, plane: &Plane3D) -> (Option<Face>, Option<Face>) {
        match self.classify_against(plane) {
            Classification::Front | Classification::Coplanar => return (Some(self), None),
            Classification::Back => return (None, Some(self)),
            Classification::Spanning => {}
        }

        let sides: Vec<PlaneSide> = self
            .vertices()
            .iter()
            .map(|v| plane.classify_point(v))
            .collect();
        let (front_verts, back_verts) = split_vertices(self.vertices(), &sides, plane);

        let front = (front_verts.len() >= 3).then(|| self.fragment(front_verts));
        let back = (back_verts.len() >= 3).then(|| self.fragment(back_verts));
        (front, back)
    }
}

impl Face {
    /// Splits `other` by this face's plane. See [`Cuttable::cut`].
    #[inline]
    pub fn split(&self, other: Face) -> (Option<Face>, Option<Face>) {
        other.cut(self.plane())
    }
}

/// Walks the polygon edges and builds the two vertex lists of a spanning face
/// (Sutherland-Hodgman), adding intersection points where edges cross.
///
/// On-plane vertices go to both lists; they are not deduplicated.
fn split_vertices(
    vertices: &[Vertex],
    sides: &[PlaneSide],
    plane: &Plane3D,
) -> (Vec<Vertex>, Vec<Vertex>) {
    let n = vertices.len();
    let mut front_verts = Vec::with_capacity(n + 2);
    let mut back_verts = Vec::with_capacity(n + 2);

    for i in 0..n {
        let current = &vertices[i];
        let current_side = sides[i];
        let next_idx = (i + 1) % n;

        match current_side {
            PlaneSide::Front => front_verts.push(*current),
            PlaneSide::Back => back_verts.push(*current),
            PlaneSide::OnPlane => {
                front_verts.push(*current);
                back_verts.push(*current);
            }
        }

        if current_side.sign() * sides[next_idx].sign() < 0 {
            let intersection = plane.intersect_segment(current, &vertices[next_idx]);
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    (front_verts, back_verts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, ShapeId, vertex};
    use nalgebra::Vector3;

    fn square(color: Rgb) -> Face {
        Face::new(
            vec![
                vertex(-1.0, -1.0, 0.0),
                vertex(1.0, -1.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(-1.0, 1.0, 0.0),
            ],
            color,
            Some(ShapeId(7)),
        )
    }

    fn x_plane(offset: f32) -> Plane3D {
        // x = offset, normal +X
        Plane3D::new(Vector3::new(1.0, 0.0, 0.0), -offset)
    }

    #[test]
    fn entirely_in_front_is_passed_through() {
        let face = square(Rgb::WHITE);
        let ptr = face.vertices().as_ptr();
        let (front, back) = face.cut(&x_plane(-5.0));
        let front = front.unwrap();
        assert!(back.is_none());
        assert_eq!(front.vertices().as_ptr(), ptr);
    }

    #[test]
    fn entirely_behind_is_passed_through() {
        let face = square(Rgb::WHITE);
        let ptr = face.vertices().as_ptr();
        let (front, back) = face.cut(&x_plane(5.0));
        assert!(front.is_none());
        assert_eq!(back.unwrap().vertices().as_ptr(), ptr);
    }

    #[test]
    fn coplanar_goes_front() {
        let face = square(Rgb::WHITE);
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, -1.0), 0.0);
        let (front, back) = face.clone().cut(&plane);
        assert_eq!(front, Some(face));
        assert!(back.is_none());
    }

    #[test]
    fn touching_edge_is_not_split() {
        // Two vertices on the plane, the rest in front.
        let face = square(Rgb::WHITE);
        let (front, back) = face.clone().cut(&x_plane(-1.0));
        assert_eq!(front, Some(face));
        assert!(back.is_none());
    }

    #[test]
    fn spanning_square_splits_into_two_quads() {
        let color = Rgb::new(10, 20, 30);
        let (front, back) = square(color).cut(&x_plane(0.0));
        let front = front.unwrap();
        let back = back.unwrap();

        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert!(front.vertices().iter().all(|v| v.x >= 0.0));
        assert!(back.vertices().iter().all(|v| v.x <= 0.0));
        assert!(front.vertices().iter().all(|v| v.w == 1.0));

        // Fragments inherit colour, provenance and orientation.
        assert_eq!(front.color(), color);
        assert_eq!(back.source(), Some(ShapeId(7)));
        assert_eq!(front.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(back.normal(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn split_conserves_original_vertices() {
        let face = square(Rgb::WHITE);
        let original = face.vertices().to_vec();
        let plane = x_plane(0.25);
        let (front, back) = face.cut(&plane);
        let front = front.unwrap();
        let back = back.unwrap();

        for v in &original {
            let in_front = front.vertices().contains(v);
            let in_back = back.vertices().contains(v);
            match plane.classify_point(v) {
                PlaneSide::Front => assert!(in_front && !in_back),
                PlaneSide::Back => assert!(in_back && !in_front),
                PlaneSide::OnPlane => assert!(in_front && in_back),
            }
        }

        // Inserted points are shared and lie on the plane.
        let inserted: Vec<&Vertex> = front
            .vertices()
            .iter()
            .filter(|v| !original.contains(v))
            .collect();
        assert_eq!(inserted.len(), 2);
        for v in inserted {
            assert!(back.vertices().contains(v));
            assert!(plane.signed_distance(v).abs() < crate::PLANE_EPSILON);
        }
    }

    #[test]
    fn on_plane_vertex_goes_to_both_sides() {
        // Diagonal cut through two opposite corners.
        let plane = Plane3D::new(Vector3::new(1.0, -1.0, 0.0), 0.0);
        let (front, back) = square(Rgb::WHITE).cut(&plane);
        let front = front.unwrap();
        let back = back.unwrap();

        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 3);
        assert!(front.vertices().contains(&vertex(1.0, 1.0, 0.0)));
        assert!(back.vertices().contains(&vertex(1.0, 1.0, 0.0)));
        assert!(front.vertices().contains(&vertex(-1.0, -1.0, 0.0)));
        assert!(back.vertices().contains(&vertex(-1.0, -1.0, 0.0)));
    }

    #[test]
    fn split_uses_partition_face_plane() {
        let partition = Face::new(
            vec![
                vertex(0.0, -5.0, -5.0),
                vertex(0.0, 5.0, -5.0),
                vertex(0.0, 0.0, 5.0),
            ],
            Rgb::WHITE,
            None,
        );
        let (front, back) = partition.split(square(Rgb::WHITE));
        assert!(front.is_some());
        assert!(back.is_some());
    }

    #[test]
    fn cut_outcome_matches_face_classification() {
        let face = square(Rgb::WHITE);
        let planes = [
            x_plane(-5.0),
            x_plane(5.0),
            x_plane(-1.0),
            x_plane(0.5),
            Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 0.0),
        ];
        for plane in &planes {
            let expected = face.classify_against(plane);
            let outcome = face.clone().cut(plane);
            match expected {
                Classification::Front | Classification::Coplanar => {
                    assert_eq!(outcome, (Some(face.clone()), None))
                }
                Classification::Back => assert_eq!(outcome, (None, Some(face.clone()))),
                Classification::Spanning => {
                    assert!(outcome.0.is_some() && outcome.1.is_some())
                }
            }
        }
    }

    #[test]
    fn edges_cross_only_between_opposite_signs() {
        // One vertex on the plane, one edge crossing strictly.
        let face = Face::new(
            vec![
                vertex(0.0, -1.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(-1.0, 1.0, 0.0),
            ],
            Rgb::WHITE,
            None,
        );
        let (front, back) = face.cut(&x_plane(0.0));
        // On-plane vertex shared, plus one intersection on the top edge.
        assert_eq!(front.unwrap().len(), 3);
        assert_eq!(back.unwrap().len(), 3);
    }
}
