//! [`Rasterizer`] implementation that records into a `wgpu::RenderPass`.

use wgpu::util::DeviceExt;

use super::pipeline::BatchRenderer;
use crate::render2d::{DrawCall, EffectId, Rasterizer, TextureHandle, Vertex};

/// Replays a flush into an open render pass.
pub struct WgpuRasterizer<'a, 'pass> {
    device: &'a wgpu::Device,
    renderer: &'a BatchRenderer,
    pass: &'a mut wgpu::RenderPass<'pass>,
    effect: EffectId,
    pass_index: u32,
    line_width: f32,
    warned_line_width: bool,
    buffers: Option<(wgpu::Buffer, wgpu::Buffer)>,
}

impl<'a, 'pass> WgpuRasterizer<'a, 'pass> {
    pub fn new(device: &'a wgpu::Device, renderer: &'a BatchRenderer, pass: &'a mut wgpu::RenderPass<'pass>) -> Self {
        Self {
            device,
            renderer,
            pass,
            effect: EffectId::BASIC,
            pass_index: 0,
            line_width: 1.0,
            warned_line_width: false,
            buffers: None,
        }
    }

    /// Last width passed to `set_line_width`.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }
}

impl Rasterizer for WgpuRasterizer<'_, '_> {
    fn pass_count(&self, effect: EffectId) -> u32 {
        self.renderer.pass_count(effect)
    }

    fn apply_pass(&mut self, effect: EffectId, pass: u32) {
        // The pipeline also depends on the topology, so it is set at draw time.
        self.effect = effect;
        self.pass_index = pass;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        if width != 1.0 && !self.warned_line_width {
            log::warn!("wgpu rasterizes lines 1px wide; requested width {} is ignored", width);
            self.warned_line_width = true;
        }
    }

    fn bind_textures(&mut self, primary: Option<TextureHandle>, secondary: Option<TextureHandle>) {
        let textures = &self.renderer.textures;
        self.pass
            .set_bind_group(0, textures.bind_group(primary.unwrap_or(TextureHandle::WHITE)), &[]);
        self.pass
            .set_bind_group(1, textures.bind_group(secondary.unwrap_or(TextureHandle::WHITE)), &[]);
    }

    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("batch vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("batch index buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.pass
            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.buffers = Some((vertex_buffer, index_buffer));
    }

    fn draw_indexed(&mut self, call: DrawCall) {
        if self.buffers.is_none() {
            log::warn!("draw before upload; skipped");
            return;
        }
        let pipeline = self.renderer.pipeline(self.effect, self.pass_index, call.topology);
        self.pass.set_pipeline(pipeline);
        self.pass.draw_indexed(call.index_range(), 0, 0..1);
    }
}
