use crate::controller::Controller;
use slot::{Batch, SharedSlot, Status};

/// Anything the display side can drain batches from.
pub trait BatchSource {
    fn drain(&self) -> (Batch, Status);
}

impl BatchSource for SharedSlot {
    fn drain(&self) -> (Batch, Status) {
        SharedSlot::drain(self)
    }
}

impl BatchSource for Controller {
    fn drain(&self) -> (Batch, Status) {
        Controller::drain(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A fresh batch replaced the display set.
    Updated,
    /// Nothing was pending.
    Idle,
    /// A batch was taken but discarded because the run was not started.
    Suppressed(Status),
}

/// Consumer side of the pipeline: keeps the set of points currently shown.
#[derive(Debug, Default)]
pub struct DisplayPoller {
    display: Batch,
    polls: u64,
    updates: u64,
    suppressed: u64,
}

impl DisplayPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll<S: BatchSource + ?Sized>(&mut self, source: &S) -> PollOutcome {
        let (batch, status) = source.drain();
        self.apply(batch, status)
    }

    /// Only a non-empty batch drained under `Started` becomes the display set.
    pub fn apply(&mut self, batch: Batch, status: Status) -> PollOutcome {
        self.polls = self.polls.wrapping_add(1);
        if batch.is_empty() {
            return PollOutcome::Idle;
        }
        if status != Status::Started {
            self.suppressed += 1;
            log::trace!("discarded batch of {} points while {status}", batch.len());
            return PollOutcome::Suppressed(status);
        }
        self.display = batch;
        self.updates += 1;
        PollOutcome::Updated
    }

    pub fn display(&self) -> &Batch {
        &self.display
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }
}
