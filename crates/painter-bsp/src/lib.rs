//! Painter's-algorithm face ordering with a BSP tree.
//!
//! Scene objects are decomposed into planar convex [`Face`]s, partitioned
//! into a [`BspTree`](bsp::BspTree), ordered back-to-front for the
//! [`Camera`] position and projected to screen polygons by the [`Painter`].

pub mod bsp;
mod camera;
mod color;
mod cuttable;
mod face;
mod painter;
mod plane;
mod projection;
mod scene;
mod shape;
pub mod transform;

pub use bsp::{BspNode, BspTree, BspVisitor, CollectingVisitor, FirstFace, FnVisitor, PlaneSelector};
pub use camera::{Camera, PITCH_LIMIT};
pub use color::{ColorScheme, Rgb, UnknownColorScheme};
pub use cuttable::Cuttable;
pub use face::{Face, Vertex, vertex};
pub use painter::{Diagnostics, Frame, Painter, PainterConfig, ScreenFace};
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide, Position};
pub use projection::{NearClip, Projection, perspective_matrix};
pub use scene::Scene;
pub use shape::{Shape, ShapeError, ShapeId, ShapeKind, ShapeParams};
