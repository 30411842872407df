//! Rendering backend: wgpu implementation of the batcher's
//! [`Rasterizer`](crate::render2d::Rasterizer).
//!
//! A typical frame:
//!
//! ```text
//! batcher.set_camera(view_projection(&camera, gpu.viewport()));
//! game.draw(&mut batcher)?;                 // shape calls
//! render_frame(&gpu, &renderer, &mut batcher, ClearColor::default())?;
//! ```

pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod rasterizer;
pub mod texture;

pub use gpu::{GpuContext, GpuError};
pub use pass::{render_frame, ClearColor};
pub use pipeline::BatchRenderer;
pub use rasterizer::WgpuRasterizer;
pub use texture::{TextureError, TextureStore};
