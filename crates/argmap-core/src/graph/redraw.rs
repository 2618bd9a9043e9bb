//! Single-slot redraw scheduling.
//!
//! Every mutation of a [`Graph`](super::Graph) asks for a redraw. Requests
//! are coalesced: scheduling replaces whatever request is still pending, so
//! a burst of mutations between two frames results in one recomputation.
//! The host drains the slot once per tick with [`RedrawScheduler::take`].

use log::trace;

/// What triggered a redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedrawCause {
    ClaimAdded,
    RelationAdded,
    ClaimDeleted,
    RelationDeleted,
    /// Text, attributes or position of a claim changed
    ClaimChanged,
    SelectionChanged,
}

/// A pending redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    cause: RedrawCause,
    generation: u64,
}

impl RedrawRequest {
    /// The mutation that scheduled this request
    pub fn cause(&self) -> RedrawCause {
        self.cause
    }

    /// Monotonic counter, increasing with every scheduled request.
    ///
    /// Hosts may use it to tell whether anything happened since the last
    /// frame they drew.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Cancellable slot holding at most one redraw request.
#[derive(Debug, Default, Clone)]
pub struct RedrawScheduler {
    pending: Option<RedrawRequest>,
    generation: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a redraw, superseding any pending request.
    pub fn schedule(&mut self, cause: RedrawCause) {
        self.generation += 1;

        if let Some(previous) = self.pending.replace(RedrawRequest {
            cause,
            generation: self.generation,
        }) {
            trace!(
                superseded:? = previous.cause,
                cause:? = cause;
                "Redraw request superseded"
            );
        }
    }

    /// Removes and returns the pending request, if any.
    pub fn take(&mut self) -> Option<RedrawRequest> {
        self.pending.take()
    }

    /// Drops the pending request without running it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
