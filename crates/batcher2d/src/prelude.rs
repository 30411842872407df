//! Convenience re-exports — `use batcher2d::prelude::*` for the common items.

pub use crate::config::{BatcherConfig, ConfigError};
pub use crate::input::{ActionMap, InputSnapshot, InputState};
pub use crate::math::{Mat3, Rect, Vec2, Vec3};
pub use crate::render2d::{
    BatchError, Batcher, Camera2d, Color, CommandLog, EffectId, FrameStats, Rasterizer,
    RenderState, Sprite, SpriteSheet, TextureHandle, Topology, TransformStack, view_projection,
    visible_bounds,
};
#[cfg(feature = "gpu")]
pub use crate::input::{KeyCode, MouseButton};
#[cfg(feature = "gpu")]
pub use crate::render::{BatchRenderer, ClearColor, GpuContext, GpuError, TextureError, render_frame};
