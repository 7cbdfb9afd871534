use crate::generator::{GeneratorError, GeneratorWorker, WorkerReport};
use crate::worker_thread::{WorkerThread, GENERATOR_THREAD_NAME};
use settings::{PipelineSettings, SettingsError};
use slot::{Batch, SharedSlot, Status, TransitionError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to spawn generator thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("generator failed to start: {0}")]
    WorkerStartup(#[from] GeneratorError),
    #[error("thread '{0}' exited before reporting status")]
    WorkerLost(String),
}

impl ControllerError {
    pub fn transition(&self) -> Option<TransitionError> {
        match self {
            ControllerError::Transition(err) => Some(*err),
            _ => None,
        }
    }
}

type GeneratorHandle = JoinHandle<Option<WorkerReport>>;

/// Owns the shared slot and the generator thread for one pipeline.
///
/// All methods take `&self`; the controller can be shared behind an `Arc`.
/// `start` and `stop` serialize on the worker handle, so a new generator is
/// only spawned after the previous one has been joined.
pub struct Controller {
    slot: Arc<SharedSlot>,
    settings: PipelineSettings,
    worker: Mutex<Option<GeneratorHandle>>,
}

impl Controller {
    pub fn new(settings: PipelineSettings) -> Result<Self, ControllerError> {
        settings.validate()?;
        Ok(Self {
            slot: Arc::new(SharedSlot::new()),
            settings,
            worker: Mutex::new(None),
        })
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<GeneratorHandle>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn slot(&self) -> &Arc<SharedSlot> {
        &self.slot
    }

    pub fn status(&self) -> Status {
        self.slot.status()
    }

    /// True while a generator thread is alive.
    pub fn worker_active(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn start(&self) -> Result<(), ControllerError> {
        let mut worker = self.lock_worker();
        self.slot.start()?;
        if let Some(previous) = worker.take() {
            join_generator(previous);
        }

        let slot = Arc::clone(&self.slot);
        let settings = self.settings.clone();
        let spawned = WorkerThread::spawn(GENERATOR_THREAD_NAME, move || {
            GeneratorWorker::new(slot, &settings).map(|generator| move || generator.run())
        });
        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                log::info!("generator thread started");
                Ok(())
            }
            Err(err) => {
                let _ = self.slot.stop();
                log::error!("generator thread failed to start: {err}");
                Err(err)
            }
        }
    }

    /// Pauses or resumes production. Ignored with `NotRunning` when finished.
    pub fn pause(&self, paused: bool) -> Result<(), ControllerError> {
        self.slot.set_paused(paused)?;
        log::info!(
            "generator {}",
            if paused { "paused" } else { "resumed" }
        );
        Ok(())
    }

    /// Finishes the run, drops any pending batch and joins the generator.
    pub fn stop(&self) -> Result<Option<WorkerReport>, ControllerError> {
        let mut worker = self.lock_worker();
        self.slot.stop()?;
        let report = worker.take().and_then(join_generator);
        log::info!("generator thread stopped");
        Ok(report)
    }

    pub fn drain(&self) -> (Batch, Status) {
        self.slot.drain()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        let _ = self.slot.stop();
        if let Some(handle) = self.lock_worker().take() {
            join_generator(handle);
        }
    }
}

fn join_generator(handle: GeneratorHandle) -> Option<WorkerReport> {
    match handle.join() {
        Ok(report) => report,
        Err(_) => {
            log::error!("generator thread panicked");
            None
        }
    }
}
