//! BSP tree node implementation.

use crate::{Face, Plane3D};

/// A node in the BSP tree.
///
/// Each node owns exactly one face, whose plane splits the remaining space.
/// Every face under `front` lies on the non-negative side of that plane and
/// every face under `back` on the non-positive side.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// The partition face. Its plane is the splitting plane.
    face: Face,

    /// Subtree containing faces in FRONT of the splitting plane.
    front: Option<Box<BspNode>>,

    /// Subtree containing faces BEHIND the splitting plane.
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a leaf node for the given partition face.
    pub fn new(face: Face) -> Self {
        Self {
            face,
            front: None,
            back: None,
        }
    }

    /// Returns the partition face.
    #[inline]
    pub fn face(&self) -> &Face {
        &self.face
    }

    /// Returns the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        self.face.plane()
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    /// Sets the front child subtree.
    #[inline]
    pub fn set_front(&mut self, node: Option<BspNode>) {
        self.front = node.map(Box::new);
    }

    /// Sets the back child subtree.
    #[inline]
    pub fn set_back(&mut self, node: Option<BspNode>) {
        self.back = node.map(Box::new);
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the number of faces in this subtree (one per node).
    pub fn face_count(&self) -> usize {
        1 + self.front.as_ref().map_or(0, |n| n.face_count())
            + self.back.as_ref().map_or(0, |n| n.face_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, vertex};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::new(
            vec![
                vertex(a[0], a[1], a[2]),
                vertex(b[0], b[1], b[2]),
                vertex(c[0], c[1], c[2]),
            ],
            Rgb::WHITE,
            None,
        )
    }

    fn leaf() -> BspNode {
        BspNode::new(make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]))
    }

    #[test]
    fn new_node_is_leaf() {
        let node = leaf();
        assert!(node.is_leaf());
        assert_eq!(node.face_count(), 1);
        assert_eq!(node.depth(), 1);
        assert_eq!(node.plane(), node.face().plane());
    }

    #[test]
    fn set_children_updates_leaf_status() {
        let mut node = leaf();

        node.set_front(Some(leaf()));
        assert!(!node.is_leaf());

        node.set_front(None);
        assert!(node.is_leaf());

        node.set_back(Some(leaf()));
        assert!(!node.is_leaf());
        assert!(node.back().is_some());
    }

    #[test]
    fn depth_and_count() {
        let mut root = leaf();
        let mut front = leaf();
        front.set_front(Some(leaf()));
        root.set_front(Some(front));

        // root -> front -> front (depth 3)
        assert_eq!(root.depth(), 3);

        root.set_back(Some(leaf()));
        // Still depth 3 (front branch is deeper)
        assert_eq!(root.depth(), 3);
        assert_eq!(root.face_count(), 4);
    }
}
