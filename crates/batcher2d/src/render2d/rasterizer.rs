//! # Rasterizer — The Seam Between Batching and the GPU
//!
//! The batcher never talks to a graphics API directly. At flush time it
//! drives a [`Rasterizer`] with a small, fixed command vocabulary:
//!
//! ```text
//! upload(vertices, indices)           once per flush
//! for each batch:
//!     set_line_width(w)               line lists, only when w changed
//!     bind_textures(primary, second)
//!     for pass in 0..pass_count(effect):
//!         apply_pass(effect, pass)
//!         draw_indexed(DrawCall)
//! ```
//!
//! The wgpu backend (`render::WgpuRasterizer`) turns these into render pass
//! commands. [`CommandLog`] records them verbatim, which is what the tests
//! use and what is handy when a frame produces more draw calls than expected.

use super::state::{EffectId, TextureHandle, Topology};
use super::vertex::Vertex;

/// One indexed draw over the vertices uploaded for this flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub topology: Topology,
    /// Number of vertices uploaded for the flush.
    pub vertex_count: u32,
    /// First index of the batch in the uploaded index buffer.
    pub start_index: u32,
    pub primitive_count: u32,
}

impl DrawCall {
    /// The index range this call covers.
    pub fn index_range(&self) -> std::ops::Range<u32> {
        self.start_index..self.start_index + self.topology.index_count(self.primitive_count)
    }
}

/// Receives the commands a flush produces.
pub trait Rasterizer {
    /// How many passes `effect` needs. Each pass gets its own draw call.
    fn pass_count(&self, _effect: EffectId) -> u32 {
        1
    }

    /// Make pass `pass` of `effect` current.
    fn apply_pass(&mut self, effect: EffectId, pass: u32);

    /// Change the rasterized line width.
    fn set_line_width(&mut self, width: f32);

    /// Bind the textures the next draw samples from.
    fn bind_textures(&mut self, primary: Option<TextureHandle>, secondary: Option<TextureHandle>);

    /// Make the accumulated geometry available to the following draws.
    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]);

    fn draw_indexed(&mut self, call: DrawCall);
}

/// A single recorded rasterizer command.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCommand {
    Upload { vertices: usize, indices: usize },
    SetLineWidth(f32),
    BindTextures {
        primary: Option<TextureHandle>,
        secondary: Option<TextureHandle>,
    },
    ApplyPass { effect: EffectId, pass: u32 },
    Draw(DrawCall),
}

/// A rasterizer that records every command and keeps a copy of the last
/// uploaded geometry.
#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<RasterCommand>,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Passes reported for effects other than [`EffectId::BASIC`].
    pub extra_passes: u32,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded draw call, in order.
    pub fn draws(&self) -> Vec<DrawCall> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RasterCommand::Draw(call) => Some(*call),
                _ => None,
            })
            .collect()
    }

    /// Every line width change, in order.
    pub fn line_widths(&self) -> Vec<f32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RasterCommand::SetLineWidth(w) => Some(*w),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.vertices.clear();
        self.indices.clear();
    }
}

impl Rasterizer for CommandLog {
    fn pass_count(&self, effect: EffectId) -> u32 {
        if effect == EffectId::BASIC {
            1
        } else {
            self.extra_passes.max(1)
        }
    }

    fn apply_pass(&mut self, effect: EffectId, pass: u32) {
        self.commands.push(RasterCommand::ApplyPass { effect, pass });
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(RasterCommand::SetLineWidth(width));
    }

    fn bind_textures(&mut self, primary: Option<TextureHandle>, secondary: Option<TextureHandle>) {
        self.commands
            .push(RasterCommand::BindTextures { primary, secondary });
    }

    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.vertices = vertices.to_vec();
        self.indices = indices.to_vec();
        self.commands.push(RasterCommand::Upload {
            vertices: vertices.len(),
            indices: indices.len(),
        });
    }

    fn draw_indexed(&mut self, call: DrawCall) {
        self.commands.push(RasterCommand::Draw(call));
    }
}
