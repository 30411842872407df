//! # Batch — Closing Runs of Same-State Geometry
//!
//! The coalescer remembers the render state of the shape submitted last and
//! where its batch started in the index buffer. When the next shape arrives
//! with an incompatible state, the run so far is closed into a [`Batch`] and a
//! new one begins at the current index cursor.
//!
//! ```text
//!  submit(A) submit(A) submit(B) submit(A)      index buffer
//!  ───────── ───────── ───────── ─────────      ┌────────┬────┬────┐
//!      └─── batch 0 (A) ───┘ batch 1  batch 2    │ A  A   │ B  │ A  │
//!                            (B)      (A)        └────────┴────┴────┘
//! ```
//!
//! An in-progress batch with no indices is dropped instead of closed, so a
//! state change right after a flush (or two state changes in a row) never
//! yields a zero-length draw call.

use super::state::{Batch, RenderState};

#[derive(Default)]
pub(crate) struct Coalescer {
    pending: Option<RenderState>,
    start: u32,
    closed: Vec<Batch>,
}

impl Coalescer {
    /// Register the state of the shape about to be emitted. `cursor` is the
    /// current index write position.
    pub fn submit(&mut self, state: RenderState, cursor: u32) {
        if let Some(pending) = &self.pending {
            if !pending.compatible_with(&state) {
                self.close(cursor);
            }
        }
        self.pending = Some(state);
    }

    /// Close the in-progress batch at `cursor`, if it holds any indices.
    pub fn close(&mut self, cursor: u32) {
        let count = cursor - self.start;
        if count == 0 {
            return;
        }
        if let Some(state) = self.pending {
            self.closed.push(Batch {
                state,
                start: self.start,
                index_count: count,
            });
        }
        self.start = cursor;
    }

    pub fn batches(&self) -> &[Batch] {
        &self.closed
    }

    pub fn pending(&self) -> Option<&RenderState> {
        self.pending.as_ref()
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.start = 0;
        self.closed.clear();
    }
}
