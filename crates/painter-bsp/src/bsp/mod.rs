//! Binary Space Partitioning tree for painter's-algorithm ordering.
//!
//! The tree recursively partitions space using the planes of its input
//! faces. Walking it relative to a viewpoint yields faces farthest first, so
//! painting them in that order leaves the nearest surfaces on top.
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use painter_bsp::bsp::{BspTree, CollectingVisitor};
//! use painter_bsp::{Scene, Shape};
//!
//! let mut scene = Scene::new();
//! scene.push(Shape::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::new(0.0, 0.0, 5.0)));
//!
//! let tree = BspTree::from_scene(&scene);
//!
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_back_to_front(Point3::origin(), &mut visitor);
//! assert_eq!(visitor.into_faces().len(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: The container holding the root node and build statistics
//! - [`BspNode`]: One partition face with its front and back subtrees
//! - [`PlaneSelector`]: Strategy trait for choosing the partition face
//! - [`BspVisitor`]: Receives faces during traversal

mod node;
mod selector;
mod tree;
mod visitor;

pub use node::BspNode;
pub use selector::{FirstFace, PlaneSelector};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
