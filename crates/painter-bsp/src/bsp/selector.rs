//! Splitting-face selection for BSP tree construction.
//!
//! The choice of partition face decides tree balance and how many faces get
//! split. Only the first-face policy is provided; it can produce deep,
//! unbalanced trees and more fragments than necessary, but its output is the
//! reference ordering.

use crate::Face;

/// Strategy for selecting which face partitions a node.
pub trait PlaneSelector {
    /// Returns the index of the partition face, or `None` for an empty slice.
    fn select(&self, faces: &[Face]) -> Option<usize>;
}

/// Selects the first face in the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFace;

impl PlaneSelector for FirstFace {
    fn select(&self, faces: &[Face]) -> Option<usize> {
        (!faces.is_empty()).then_some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, vertex};

    fn make_triangle(z: f32) -> Face {
        Face::new(
            vec![
                vertex(0.0, 0.0, z),
                vertex(1.0, 0.0, z),
                vertex(0.0, 1.0, z),
            ],
            Rgb::WHITE,
            None,
        )
    }

    #[test]
    fn first_face_empty_list() {
        assert!(FirstFace.select(&[]).is_none());
    }

    #[test]
    fn first_face_multiple() {
        let faces = vec![make_triangle(0.0), make_triangle(1.0)];
        assert_eq!(FirstFace.select(&faces), Some(0));
    }
}
