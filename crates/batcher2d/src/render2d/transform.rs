//! # Transform Stack — Nested Local-to-World Transforms
//!
//! Drawing a rotated sprite inside a scrolled scene means applying two
//! transforms: the sprite's own, then the scene's. The stack keeps the
//! *composed* matrix at every level, so reading the current absolute
//! transform is a single lookup no matter how deep the nesting is.
//!
//! ```text
//!   push(scene)   → [scene]
//!   push(sprite)  → [scene, scene·sprite]
//!   peek()        →  scene·sprite        (sprite applied first)
//!   pop()         → [scene]
//! ```
//!
//! A minimum depth protects a base transform the owner set up (for example
//! the pixel → NDC mapping): popping at or below it does nothing. Unbalanced
//! pops are silently ignored rather than reported.

use crate::math::Mat3;

/// A stack of composed 2D affine transforms.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    matrices: Vec<Mat3>,
    min_depth: usize,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty stack that refuses to pop below `min_depth` entries.
    pub fn with_min_depth(min_depth: usize) -> Self {
        Self {
            matrices: Vec::new(),
            min_depth,
        }
    }

    /// A stack holding `base` that can never be popped below it.
    pub fn with_base(base: Mat3) -> Self {
        Self {
            matrices: vec![base],
            min_depth: 1,
        }
    }

    /// Compose `matrix` with the current top and push the result.
    ///
    /// `matrix` is applied to points before the existing top, so it acts as
    /// the innermost (most local) transform. Returns the composed matrix.
    pub fn push(&mut self, matrix: Mat3) -> Mat3 {
        let composed = self.peek() * matrix;
        self.matrices.push(composed);
        composed
    }

    /// Remove the top and return it, or return identity without touching the
    /// stack when it is already at its minimum depth.
    pub fn pop(&mut self) -> Mat3 {
        if self.matrices.len() > self.min_depth {
            self.matrices.pop().unwrap_or(Mat3::IDENTITY)
        } else {
            Mat3::IDENTITY
        }
    }

    /// The current absolute transform, or identity when empty.
    pub fn peek(&self) -> Mat3 {
        self.matrices.last().copied().unwrap_or(Mat3::IDENTITY)
    }

    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    pub fn min_depth(&self) -> usize {
        self.min_depth
    }
}
