//! Per-flush render statistics.

use serde::Serialize;

/// What a single [`flush`](super::Batcher::flush) sent to the rasterizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub batches: u32,
    pub draw_calls: u32,
    pub vertices: u32,
    pub indices: u32,
    pub line_width_changes: u32,
}
