//! BSP tree container, construction and painter traversal.

use nalgebra::Point3;

use crate::{Face, Scene};

use super::node::BspNode;
use super::selector::{FirstFace, PlaneSelector};
use super::visitor::{BspVisitor, CollectingVisitor};

/// A Binary Space Partitioning tree of faces.
///
/// Every node stores one face; the rest of the faces handed to that node are
/// cut by its plane and pushed into the front or back subtree. Faces that
/// straddle a plane are split in two, so the tree may hold more faces than
/// it was built from.
///
/// # Traversal
///
/// [`BspTree::traverse_back_to_front`] visits faces in painter's order for a
/// given viewpoint. The topology does not depend on the viewpoint, so a tree
/// built once for static geometry can be traversed again every time the
/// viewpoint moves.
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    root: Option<BspNode>,
    split_fragments: usize,
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a BSP tree from a list of faces.
    ///
    /// Uses the provided [`PlaneSelector`] to choose partition faces. Faces
    /// spanning a partition plane are split with [`Cuttable`](crate::Cuttable).
    ///
    /// Returns an empty tree if the input is empty.
    pub fn build<S: PlaneSelector>(faces: Vec<Face>, selector: &S) -> Self {
        let mut split_fragments = 0;
        let root = build_node(faces, selector, &mut split_fragments);
        Self {
            root,
            split_fragments,
        }
    }

    /// Builds a BSP tree using the first face of every list as the partition.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self::build(faces, &FirstFace)
    }

    /// Decomposes every scene object and builds a tree from all the faces.
    ///
    /// Objects that fail to decompose are logged and left out.
    pub fn from_scene(scene: &Scene) -> Self {
        let faces = scene.faces();
        if faces.is_empty() {
            log::warn!("no faces extracted from {} scene objects", scene.len());
        }
        Self::from_faces(faces)
    }

    /// Returns `true` if the tree contains no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_ref()
    }

    /// Returns the total number of faces in the tree, fragments included.
    pub fn face_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.face_count())
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Number of fragments produced by splitting during the build.
    ///
    /// Each straddling face that yields both a front and a back part adds two.
    #[inline]
    pub fn split_fragments(&self) -> usize {
        self.split_fragments
    }

    /// Traverses the tree back-to-front relative to the given viewpoint.
    ///
    /// At every node the far subtree is visited first, then the node's face
    /// (if it passes the facing test), then the near subtree. The face is
    /// skipped when `eye` lies on its plane.
    pub fn traverse_back_to_front<'a, V: BspVisitor<'a>>(
        &'a self,
        eye: Point3<f32>,
        visitor: &mut V,
    ) {
        if let Some(ref root) = self.root {
            traverse_back_to_front_node(root, &eye, visitor);
        }
    }

    /// Returns the faces to paint, farthest first.
    pub fn rendering_order(&self, eye: Point3<f32>) -> Vec<&Face> {
        let mut visitor = CollectingVisitor::new();
        self.traverse_back_to_front(eye, &mut visitor);
        visitor.into_faces()
    }

    /// Collects all faces in the tree, in pre-order.
    pub fn collect_faces(&self) -> Vec<&Face> {
        let mut result = Vec::with_capacity(self.face_count());
        collect_faces_recursive(self.root.as_ref(), &mut result);
        result
    }
}

/// Recursively builds a BSP node from a list of faces.
fn build_node<S: PlaneSelector>(
    mut faces: Vec<Face>,
    selector: &S,
    split_fragments: &mut usize,
) -> Option<BspNode> {
    let splitter_idx = selector.select(&faces)?;
    let splitter = faces.remove(splitter_idx);

    let mut front_list = Vec::new();
    let mut back_list = Vec::new();

    for face in faces {
        match splitter.split(face) {
            (Some(f), Some(b)) => {
                *split_fragments += 2;
                front_list.push(f);
                back_list.push(b);
            }
            (Some(f), None) => front_list.push(f),
            (None, Some(b)) => back_list.push(b),
            (None, None) => {}
        }
    }

    let mut node = BspNode::new(splitter);
    node.set_front(build_node(front_list, selector, split_fragments));
    node.set_back(build_node(back_list, selector, split_fragments));

    Some(node)
}

/// Traverses a node subtree back-to-front.
fn traverse_back_to_front_node<'a, V: BspVisitor<'a>>(
    node: &'a BspNode,
    eye: &Point3<f32>,
    visitor: &mut V,
) {
    let face = node.face();

    if face.classify(eye) > 0.0 {
        // Eye is in front: back subtree is farther
        if let Some(back) = node.back() {
            traverse_back_to_front_node(back, eye, visitor);
        }
        if face.facing(eye) > 0.0 {
            visitor.visit(face);
        }
        if let Some(front) = node.front() {
            traverse_back_to_front_node(front, eye, visitor);
        }
    } else {
        // Eye is on or behind the plane: front subtree is farther
        if let Some(front) = node.front() {
            traverse_back_to_front_node(front, eye, visitor);
        }
        if face.facing(eye) < 0.0 {
            visitor.visit(face);
        }
        if let Some(back) = node.back() {
            traverse_back_to_front_node(back, eye, visitor);
        }
    }
}

/// Recursively collects all faces from a node subtree.
fn collect_faces_recursive<'a>(node: Option<&'a BspNode>, result: &mut Vec<&'a Face>) {
    if let Some(n) = node {
        result.push(n.face());
        collect_faces_recursive(n.front(), result);
        collect_faces_recursive(n.back(), result);
    }
}
