//! Visitor pattern for BSP tree traversal.
//!
//! Visitors receive faces in paint order without coupling traversal logic
//! to a particular consumer.

use crate::Face;

/// Receives each emitted face during a back-to-front traversal.
pub trait BspVisitor<'a> {
    fn visit(&mut self, face: &'a Face);
}

/// A visitor that collects references to all visited faces.
#[derive(Debug, Default)]
pub struct CollectingVisitor<'a> {
    collected: Vec<&'a Face>,
}

impl<'a> CollectingVisitor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected faces, in visit order.
    pub fn into_faces(self) -> Vec<&'a Face> {
        self.collected
    }

    pub fn faces(&self) -> &[&'a Face] {
        &self.collected
    }
}

impl<'a> BspVisitor<'a> for CollectingVisitor<'a> {
    fn visit(&mut self, face: &'a Face) {
        self.collected.push(face);
    }
}

/// A visitor that calls a closure for each face.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<'a, F> BspVisitor<'a> for FnVisitor<F>
where
    F: FnMut(&'a Face),
{
    fn visit(&mut self, face: &'a Face) {
        (self.func)(face);
    }
}
