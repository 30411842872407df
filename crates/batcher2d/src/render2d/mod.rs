//! # Render2d — Immediate-Mode 2D Primitive Batching
//!
//! Game code draws by calling shape functions on a [`Batcher`] from wherever
//! it happens to be: the terrain draws its polyline, the character fills a
//! rectangle, the HUD draws a bordered bar. None of these callers know about
//! each other, yet the GPU should see as few draw calls as possible. The
//! batcher sits in between and turns a stream of unrelated shape calls into a
//! short list of draw calls.
//!
//! ## Architecture
//!
//! ```text
//!  terrain   character   HUD   ...            (any order, any number)
//!     │          │        │
//!     ▼          ▼        ▼
//!  ┌──────────────────────────────────┐
//!  │ shape builders (shapes.rs)        │  rect / circle / fan / polyline
//!  │   submit(RenderState)             │  → vertices + indices
//!  └──────────────┬───────────────────┘
//!                 │
//!     ┌───────────┴────────────┐
//!     ▼                        ▼
//!  ┌────────────────┐   ┌───────────────────────┐
//!  │ coalescer       │   │ geometry accumulator   │
//!  │ (batch.rs)      │   │ (geometry.rs)          │
//!  │ close batch on  │   │ camera × stack top     │
//!  │ state change    │   │ applied per vertex     │
//!  └───────┬────────┘   └───────────┬───────────┘
//!          │                        │
//!          ▼                        ▼
//!  ┌──────────────────────────────────────────┐
//!  │ flush (batcher.rs)                        │
//!  │  upload once, then per batch:             │
//!  │  line width → textures → passes → draw    │
//!  └──────────────────────────────────────────┘
//!                 │
//!                 ▼
//!           dyn Rasterizer  (wgpu backend, CommandLog, ...)
//! ```
//!
//! ## Design Decisions
//!
//! **Batch by recency.** A shape's render state is only compared with the
//! state of the shape submitted right before it. Drawing all HUD bars, then
//! all terrain lines, produces one batch each; interleaving them produces a
//! batch per switch. There is no sorting and no global bin-packing: the
//! submission order *is* the draw order, which keeps painter's-algorithm
//! layering intact for translucent geometry.
//!
//! **CPU-side transform.** Every vertex is multiplied by the camera matrix and
//! the transform stack top as it is written. Shapes with different transforms
//! still share a batch, and the GPU shader is a pass-through.
//!
//! **Fixed capacity.** The vertex and index arrays are sized once. Running out
//! is an error returned to the caller rather than silent truncation, because
//! truncated geometry looks plausible and is hard to spot.
//!
//! **White default texture.** Untextured shapes bind
//! [`TextureHandle::WHITE`], so flat and textured geometry go through the same
//! `texture × color` path and batch together when nothing else differs.
//!
//! ## Comparison
//!
//! - **MonoGame `SpriteBatch`**: sorts and batches textured quads only; lines
//!   and fans need a separate primitive path. This batcher handles all four
//!   topologies in one stream.
//! - **Love2D**: automatic batching of consecutive same-texture draws, the
//!   same recency rule used here.
//! - **Bevy** (`bevy_sprite`): instanced, sorted, retained. Much more
//!   machinery; scales further.

pub(crate) mod batch;
pub mod batcher;
pub mod camera;
pub mod error;
pub(crate) mod geometry;
pub mod rasterizer;
pub mod shapes;
pub mod sprite;
pub mod state;
pub mod stats;
pub mod transform;
pub mod vertex;

pub use batcher::Batcher;
pub use camera::{pixel_to_ndc, screen_to_world, view_matrix, view_projection, visible_bounds, Camera2d};
pub use error::BatchError;
pub use rasterizer::{CommandLog, DrawCall, RasterCommand, Rasterizer};
pub use shapes::{circle_points, ellipse_points, rounded_rect_points};
pub use sprite::{Sprite, SpriteSheet};
pub use state::{Batch, EffectId, RenderState, TextureHandle, Topology};
pub use stats::FrameStats;
pub use transform::TransformStack;
pub use vertex::Vertex;

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Return a copy with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
