//! The ordered set of world-space shape instances.

use nalgebra::Vector3;

use crate::transform::model_matrix;
use crate::{Face, Shape, ShapeId};

/// Owns independent, already world-transformed shape instances.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a copy of `prototype` placed with the given position, rotation
    /// (pitch, yaw, roll in degrees) and scale. The prototype is not retained.
    pub fn add_object(
        &mut self,
        prototype: &Shape,
        position: Vector3<f32>,
        rotation: Vector3<f32>,
        scale: Vector3<f32>,
    ) -> ShapeId {
        let model = model_matrix(&position, &rotation, &scale);
        self.push(prototype.transformed(&model))
    }

    /// Adds a shape whose vertices are already in world space.
    pub fn push(&mut self, shape: Shape) -> ShapeId {
        self.objects.push(shape);
        ShapeId(self.objects.len() - 1)
    }

    /// Removes and returns an object. Ids of later objects shift down by one.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        (id.0 < self.objects.len()).then(|| self.objects.remove(id.0))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.objects.get(id.0)
    }

    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    /// Iterates objects with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, shape)| (ShapeId(i), shape))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Decomposes every object into faces, in scene order.
    ///
    /// An object whose decomposition fails is logged and skipped; the rest of
    /// the scene is still returned.
    pub fn faces(&self) -> Vec<Face> {
        let mut faces = Vec::new();
        for (id, shape) in self.iter() {
            match shape.faces(id) {
                Ok(shape_faces) => faces.extend(shape_faces),
                Err(err) => log::warn!("skipping {} {id}: {err}", shape.kind()),
            }
        }
        faces
    }
}
