//! Frame evaluation: scene to ordered screen-space faces.

use std::time::Instant;

use nalgebra::Point2;

use crate::bsp::{BspTree, FnVisitor};
use crate::{Camera, ColorScheme, Face, NearClip, Projection, Rgb, Scene};

/// Options for turning the traversal into screen faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PainterConfig {
    pub color_scheme: ColorScheme,
    pub near_clip: NearClip,
}

/// Statistics about the last build and traversal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Diagnostics {
    /// Faces held by the tree, split fragments included.
    pub total_faces: usize,
    pub tree_depth: usize,
    /// Fragments produced by splitting straddling faces.
    pub split_fragments: usize,
    /// Faces emitted by the last traversal, before dropping those behind the
    /// camera.
    pub layer_count: usize,
    pub build_time_ms: f64,
    pub traverse_time_ms: f64,
}

/// A face ready for a polygon fill and outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFace {
    pub screen_points: Vec<Point2<f32>>,
    pub color: Rgb,
    /// Position in the back-to-front order, 0 for the farthest face.
    pub layer_index: usize,
    /// Distance from the face centroid to the camera, in world units.
    pub distance: f32,
}

/// Output of one evaluation, farthest face first.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub faces: Vec<ScreenFace>,
    pub diagnostics: Diagnostics,
}

/// Builds the BSP tree for a scene and orders it for a camera.
///
/// [`Painter::evaluate_frame`] rebuilds the tree every call. For static
/// geometry, call [`Painter::build`] once and [`Painter::render`] on every
/// camera move; only the traversal is repeated.
#[derive(Debug, Clone, Default)]
pub struct Painter {
    config: PainterConfig,
    tree: BspTree,
    diagnostics: Diagnostics,
}

impl Painter {
    pub fn new(config: PainterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.config.color_scheme = scheme;
    }

    pub fn set_near_clip(&mut self, near_clip: NearClip) {
        self.config.near_clip = near_clip;
    }

    /// The tree from the last build.
    #[inline]
    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    /// Statistics from the last build and render.
    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Rebuilds the BSP tree from the current scene.
    pub fn build(&mut self, scene: &Scene) {
        let start = Instant::now();
        self.tree = BspTree::from_scene(scene);
        let build_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.diagnostics = Diagnostics {
            total_faces: self.tree.face_count(),
            tree_depth: self.tree.depth(),
            split_fragments: self.tree.split_fragments(),
            build_time_ms,
            ..Diagnostics::default()
        };

        log::debug!(
            "built BSP tree: {} faces, depth {}, {} split fragments in {:.2}ms",
            self.diagnostics.total_faces,
            self.diagnostics.tree_depth,
            self.diagnostics.split_fragments,
            build_time_ms,
        );
    }

    /// Orders the current tree for `camera` and projects it to the screen.
    pub fn render(&mut self, camera: &Camera) -> Frame {
        let start = Instant::now();
        let eye = camera.position();

        let mut ordered: Vec<&Face> = Vec::with_capacity(self.tree.face_count());
        self.tree
            .traverse_back_to_front(eye, &mut FnVisitor::new(|face| ordered.push(face)));

        let projection = Projection::new(camera);
        let total = ordered.len();
        let faces: Vec<ScreenFace> = ordered
            .iter()
            .enumerate()
            .filter_map(|(layer_index, face)| {
                let screen_points = projection.project_face(face, self.config.near_clip)?;
                Some(ScreenFace {
                    screen_points,
                    color: self.config.color_scheme.color(face.color(), layer_index, total),
                    layer_index,
                    distance: (face.centroid() - eye).norm(),
                })
            })
            .collect();

        self.diagnostics.layer_count = total;
        self.diagnostics.traverse_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::trace!(
            "ordered {total} faces, {} on screen, in {:.2}ms",
            faces.len(),
            self.diagnostics.traverse_time_ms,
        );

        Frame {
            faces,
            diagnostics: self.diagnostics,
        }
    }

    /// Rebuilds the tree from `scene` and renders it for `camera`.
    pub fn evaluate_frame(&mut self, scene: &Scene, camera: &Camera) -> Frame {
        self.build(scene);
        self.render(camera)
    }
}
