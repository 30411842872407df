//! Frame orchestration: acquire the surface, clear it, flush the batcher
//! into one render pass, present.

use super::gpu::GpuContext;
use super::pipeline::BatchRenderer;
use super::rasterizer::WgpuRasterizer;
use crate::render2d::{Batcher, Color, FrameStats};

/// The color the frame is cleared to before the batch is drawn.
#[derive(Debug, Clone, Copy)]
pub struct ClearColor(pub Color);

impl Default for ClearColor {
    fn default() -> Self {
        // Dusk blue.
        Self(Color::rgb(0.1, 0.1, 0.15))
    }
}

impl ClearColor {
    fn to_wgpu(self) -> wgpu::Color {
        let c = self.0;
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

/// Draw everything `batcher` accumulated and present the frame.
///
/// The batcher is flushed even when the surface cannot be acquired, so a
/// lost frame never leaks geometry into the next one.
pub fn render_frame(
    gpu: &GpuContext,
    renderer: &BatchRenderer,
    batcher: &mut Batcher,
    clear: ClearColor,
) -> Result<FrameStats, wgpu::SurfaceError> {
    let output = match gpu.surface.get_current_texture() {
        Ok(output) => output,
        Err(err) => {
            batcher.reset();
            return Err(err);
        }
    };
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("batch frame encoder"),
        });

    let stats = {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("batch render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let mut rasterizer = WgpuRasterizer::new(&gpu.device, renderer, &mut render_pass);
        batcher.flush(&mut rasterizer)
    };

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    log::trace!("frame: {:?}", stats);
    Ok(stats)
}
