//! # Batcher — Accumulate, Coalesce, Flush
//!
//! [`Batcher`] ties the pieces together. Shape builders (see `shapes.rs`)
//! call three primitives in order:
//!
//! 1. [`submit`](Batcher::submit) the shape's [`RenderState`], which may close
//!    the previous batch,
//! 2. [`add_vertex`](Batcher::add_vertex) for each corner, which applies
//!    `camera × transform stack top` and returns the vertex slot,
//! 3. [`add_index`](Batcher::add_index) for each index, which extends the
//!    in-progress batch.
//!
//! [`flush`](Batcher::flush) then closes the last batch, replays every batch
//! against a [`Rasterizer`] in the order they were closed, and resets the
//! buffers for the next frame.
//!
//! ## Line Width Tracking
//!
//! Line width is global rasterizer state, so the batcher remembers the last
//! width it applied (starting at 1) and only issues a change when a line-list
//! batch needs a different one. The tracked width survives flushes.

use super::batch::Coalescer;
use super::error::BatchError;
use super::geometry::Geometry;
use super::rasterizer::{DrawCall, Rasterizer};
use super::state::{Batch, EffectId, RenderState, Topology};
use super::stats::FrameStats;
use super::transform::TransformStack;
use super::vertex::Vertex;
use super::Color;
use crate::config::{BatcherConfig, ConfigError};
use crate::math::{Mat3, Vec2};

/// Collects 2D geometry for a frame and flushes it as a minimal list of
/// draw calls.
pub struct Batcher {
    geometry: Geometry,
    coalescer: Coalescer,
    transforms: TransformStack,
    camera: Mat3,
    effect: EffectId,
    applied_line_width: f32,
}

impl Batcher {
    /// Build a batcher sized by `config`, rejecting capacities that are zero
    /// or do not fit a 32-bit index.
    pub fn new(config: BatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_capacity(max_vertices: usize, max_indices: usize) -> Result<Self, ConfigError> {
        Self::new(BatcherConfig::with_capacity(max_vertices, max_indices))
    }

    fn from_valid(config: BatcherConfig) -> Self {
        log::debug!(
            "batcher: {} vertices, {} indices",
            config.max_vertices,
            config.max_indices
        );
        Self {
            geometry: Geometry::new(config.max_vertices, config.max_indices),
            coalescer: Coalescer::default(),
            transforms: TransformStack::with_min_depth(config.min_transform_depth),
            camera: Mat3::IDENTITY,
            effect: EffectId::BASIC,
            applied_line_width: 1.0,
        }
    }

    // ── Transforms and camera ────────────────────────────────────────────

    /// Set the combined view × projection matrix applied to every vertex
    /// after the transform stack.
    pub fn set_camera(&mut self, view_projection: Mat3) {
        self.camera = view_projection;
    }

    pub fn camera(&self) -> Mat3 {
        self.camera
    }

    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    /// Replace the transform stack, e.g. with one built by
    /// [`TransformStack::with_base`].
    pub fn set_transforms(&mut self, transforms: TransformStack) {
        self.transforms = transforms;
    }

    pub fn push_transform(&mut self, matrix: Mat3) -> Mat3 {
        self.transforms.push(matrix)
    }

    pub fn pop_transform(&mut self) -> Mat3 {
        self.transforms.pop()
    }

    /// Effect used by the shape builders from now on.
    pub fn set_effect(&mut self, effect: EffectId) {
        self.effect = effect;
    }

    pub fn effect(&self) -> EffectId {
        self.effect
    }

    // ── Low-level submission ─────────────────────────────────────────────

    /// Announce the state of the geometry about to be added. Closes the
    /// in-progress batch if `state` is incompatible with it.
    pub fn submit(&mut self, state: RenderState) {
        self.coalescer.submit(state, self.geometry.index_cursor());
    }

    /// Transform `position`, store the vertex and return its slot.
    ///
    /// Fails with [`BatchError::NoRenderState`] until a state has been
    /// submitted this frame.
    pub fn add_vertex(&mut self, position: Vec2, color: Color, uv: Vec2) -> Result<u32, BatchError> {
        self.require_state()?;
        let matrix = self.camera * self.transforms.peek();
        let vertex = Vertex::new(matrix.transform_point2(position), color, uv);
        self.geometry.push_vertex(vertex)
    }

    /// Append `vertex` to the in-progress batch.
    pub fn add_index(&mut self, vertex: u32) -> Result<(), BatchError> {
        self.require_state()?;
        self.geometry.push_index(vertex)
    }

    fn require_state(&self) -> Result<(), BatchError> {
        match self.coalescer.pending() {
            Some(_) => Ok(()),
            None => Err(BatchError::NoRenderState),
        }
    }

    /// Whether `vertices` more vertices and `indices` more indices fit
    /// before the next flush.
    pub fn fits(&self, vertices: usize, indices: usize) -> bool {
        self.geometry.reserve(vertices, indices).is_ok()
    }

    /// Free (vertex, index) slots before the next flush.
    pub fn remaining(&self) -> (usize, usize) {
        self.geometry.remaining()
    }

    /// (max vertices, max indices).
    pub fn capacity(&self) -> (usize, usize) {
        self.geometry.capacity()
    }

    pub(crate) fn reserve(&self, vertices: usize, indices: usize) -> Result<(), BatchError> {
        self.geometry.reserve(vertices, indices)
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.geometry.vertices()
    }

    pub fn indices(&self) -> &[u32] {
        self.geometry.indices()
    }

    /// Batches closed so far this frame. The in-progress batch is not
    /// included until it is closed by a state change or a flush.
    pub fn batches(&self) -> &[Batch] {
        self.coalescer.batches()
    }

    /// State of the in-progress batch, if anything was submitted since the
    /// last flush.
    pub fn pending_state(&self) -> Option<&RenderState> {
        self.coalescer.pending()
    }

    // ── Flush ────────────────────────────────────────────────────────────

    /// Close the open batch, issue every batch to `rasterizer` in submission
    /// order, and reset for the next frame.
    pub fn flush<R: Rasterizer + ?Sized>(&mut self, rasterizer: &mut R) -> FrameStats {
        self.coalescer.close(self.geometry.index_cursor());

        let batches = self.coalescer.batches();
        if batches.is_empty() {
            self.reset();
            return FrameStats::default();
        }

        let vertices = self.geometry.vertices();
        let indices = self.geometry.indices();
        let mut stats = FrameStats {
            batches: batches.len() as u32,
            vertices: vertices.len() as u32,
            indices: indices.len() as u32,
            ..FrameStats::default()
        };

        rasterizer.upload(vertices, indices);

        for batch in batches {
            let state = &batch.state;
            if state.topology == Topology::LineList && state.line_width != self.applied_line_width {
                self.applied_line_width = state.line_width;
                rasterizer.set_line_width(state.line_width);
                stats.line_width_changes += 1;
            }

            rasterizer.bind_textures(state.texture, state.secondary);

            let call = DrawCall {
                topology: state.topology,
                vertex_count: vertices.len() as u32,
                start_index: batch.start,
                primitive_count: batch.primitive_count(),
            };
            for pass in 0..rasterizer.pass_count(state.effect) {
                rasterizer.apply_pass(state.effect, pass);
                rasterizer.draw_indexed(call);
                stats.draw_calls += 1;
            }
        }

        log::trace!(
            "flush: {} batches, {} draw calls, {} vertices, {} indices",
            stats.batches,
            stats.draw_calls,
            stats.vertices,
            stats.indices
        );

        self.reset();
        stats
    }

    /// Drop everything accumulated since the last flush without drawing it.
    pub fn reset(&mut self) {
        self.geometry.reset();
        self.coalescer.reset();
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self::from_valid(BatcherConfig::default())
    }
}
