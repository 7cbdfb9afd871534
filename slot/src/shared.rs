use crate::{Batch, Status, TransitionError};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct SlotState {
    status: Status,
    pending: Option<Batch>,
}

impl SlotState {
    fn accepts(&self) -> bool {
        self.status == Status::Started && self.pending.is_none()
    }
}

/// Result of a producer hand-off attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Publish {
    /// The slot took ownership of the batch.
    Accepted,
    /// A batch is still pending or the pipeline is paused; the batch is handed back.
    Rejected(Batch),
    /// The pipeline is finished and the producer should exit.
    Stopped,
}

/// Single-capacity mailbox plus the run status, guarded by one lock.
///
/// The producer publishes through [`SharedSlot::try_publish`], the consumer
/// takes batches through [`SharedSlot::drain`]. Every state change wakes a
/// producer blocked in [`SharedSlot::wait_for_room`].
#[derive(Debug, Default)]
pub struct SharedSlot {
    state: Mutex<SlotState>,
    changed: Condvar,
}

impl SharedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> Status {
        self.lock().status
    }

    pub fn has_pending(&self) -> bool {
        self.lock().pending.is_some()
    }

    pub fn try_publish(&self, batch: Batch) -> Publish {
        let mut state = self.lock();
        if state.accepts() {
            state.pending = Some(batch);
            Publish::Accepted
        } else if state.status == Status::Finished {
            Publish::Stopped
        } else {
            Publish::Rejected(batch)
        }
    }

    /// Takes the pending batch (empty if none) together with the status it was
    /// observed under.
    pub fn drain(&self) -> (Batch, Status) {
        let mut state = self.lock();
        let status = state.status;
        match state.pending.take() {
            Some(batch) => {
                drop(state);
                self.changed.notify_all();
                (batch, status)
            }
            None => (Batch::default(), status),
        }
    }

    pub fn start(&self) -> Result<(), TransitionError> {
        let mut state = self.lock();
        if state.status != Status::Finished {
            return Err(TransitionError::AlreadyRunning);
        }
        state.status = Status::Started;
        drop(state);
        self.changed.notify_all();
        log::debug!("slot status: finished -> started");
        Ok(())
    }

    pub fn set_paused(&self, paused: bool) -> Result<(), TransitionError> {
        let mut state = self.lock();
        if state.status == Status::Finished {
            return Err(TransitionError::NotRunning);
        }
        let next = if paused {
            Status::Paused
        } else {
            Status::Started
        };
        let previous = std::mem::replace(&mut state.status, next);
        drop(state);
        self.changed.notify_all();
        log::debug!("slot status: {previous} -> {next}");
        Ok(())
    }

    /// Finishes the run and discards any batch the consumer has not taken.
    pub fn stop(&self) -> Result<(), TransitionError> {
        let mut state = self.lock();
        if state.status == Status::Finished {
            return Err(TransitionError::AlreadyStopped);
        }
        let previous = std::mem::replace(&mut state.status, Status::Finished);
        let discarded = state.pending.take();
        drop(state);
        self.changed.notify_all();
        log::debug!(
            "slot status: {previous} -> finished (discarded pending batch: {})",
            discarded.is_some()
        );
        Ok(())
    }

    /// Blocks until the slot can accept a batch, the run is finished, or
    /// `timeout` elapses. Returns the status observed on wake-up.
    pub fn wait_for_room(&self, timeout: Duration) -> Status {
        let state = self.lock();
        let (state, _) = self
            .changed
            .wait_timeout_while(state, timeout, |s| {
                s.status == Status::Paused || (s.status == Status::Started && s.pending.is_some())
            })
            .unwrap_or_else(PoisonError::into_inner);
        state.status
    }
}
