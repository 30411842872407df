//! # Vertex — Per-Corner Data Sent to the Rasterizer
//!
//! Every shape the batcher accepts is broken down into vertices: a position,
//! a texture coordinate (UV) and a tint color. Positions are already in clip
//! space when they land in the buffer, because the camera matrix and the
//! transform stack are applied while the vertex is written.
//!
//! ## Memory Layout
//!
//! `#[repr(C)]` fixes the field order and padding, and the `bytemuck` traits
//! `Pod` and `Zeroable` let a backend cast `&[Vertex]` to `&[u8]` for upload
//! without a copy.
//!
//! ```text
//! Vertex (32 bytes per vertex)
//! ┌──────────────┬──────────────┬────────────────────────┐
//! │ position     │ uv           │ color                  │
//! │ [f32; 2]     │ [f32; 2]     │ [f32; 4]               │
//! │ 8 bytes      │ 8 bytes      │ 16 bytes               │
//! │ offset 0     │ offset 8     │ offset 16              │
//! │ location(0)  │ location(1)  │ location(2)            │
//! └──────────────┴──────────────┴────────────────────────┘
//! ```
//!
//! A vertex is immutable once written. The next frame overwrites the buffer
//! from index 0 after a flush.

use bytemuck::{Pod, Zeroable};

use super::Color;
use crate::math::Vec2;

/// Per-vertex data: clip-space position, texture coordinate and tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec2, color: Color, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            uv: uv.to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

#[cfg(feature = "gpu")]
impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn vertex_bytes_cast() {
        let v = [Vertex::new(Vec2::new(1.0, 2.0), Color::RED, Vec2::ZERO)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), 32);
    }
}
