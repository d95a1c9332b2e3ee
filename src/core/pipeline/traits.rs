//! Pipeline Latch Interface.
//!
//! The behaviors every stage relies on when it inspects or clears a latch:
//! flushing on a control-flow redirect and checking for bubbles.

use crate::core::pipeline::latches::StageLatch;

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Discards the occupant, leaving a bubble.
    ///
    /// Called when a taken branch or jump squashes instructions fetched
    /// along the wrong path, and when a stage hands its content downstream.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if no instruction occupies the latch.
    fn is_empty(&self) -> bool;

    /// Moves the content out, leaving a bubble behind.
    fn take(&mut self) -> Self
    where
        Self: Sized + Default,
    {
        std::mem::take(self)
    }
}

impl PipelineLatch for StageLatch {
    fn flush(&mut self) {
        *self = StageLatch::default();
    }

    fn is_empty(&self) -> bool {
        self.empty
    }
}
