//! Errors raised while building a frame.

use thiserror::Error;

/// Why a shape or a raw vertex/index submission was rejected.
///
/// Nothing is written when one of these is returned; the frame so far stays
/// intact and can still be flushed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    #[error("vertex buffer full: {requested} vertices requested, capacity is {max}")]
    VertexCapacity { requested: usize, max: usize },

    #[error("index buffer full: {requested} indices requested, capacity is {max}")]
    IndexCapacity { requested: usize, max: usize },

    #[error("{shape} needs at least {required} points, got {got}")]
    NotEnoughPoints {
        shape: &'static str,
        required: usize,
        got: usize,
    },

    #[error("corner radius {radius} exceeds half the shorter side ({max})")]
    RadiusTooLarge { radius: f32, max: f32 },

    #[error("{shape} needs at least one side/segment")]
    InvalidSegments { shape: &'static str },

    #[error("geometry added before any render state was submitted")]
    NoRenderState,
}
