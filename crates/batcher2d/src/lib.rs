//! # batcher2d — Immediate-Mode 2D Primitive Batching
//!
//! Draw lines, rectangles, rounded rectangles, circles, fans and strips from
//! anywhere in a frame; the [`Batcher`](render2d::Batcher) turns them into as
//! few draw calls as the submission order allows.
//!
//! Start with `use batcher2d::prelude::*`. The `gpu` feature (on by default)
//! adds the wgpu backend in [`render`].

pub mod config;
pub mod input;
pub mod math;
pub mod prelude;
pub mod render2d;

#[cfg(feature = "gpu")]
pub mod render;
