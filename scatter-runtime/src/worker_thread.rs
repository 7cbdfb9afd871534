use crate::controller::ControllerError;
use std::{sync::mpsc, thread};

pub(crate) const GENERATOR_THREAD_NAME: &str = "scatter-generator";

pub(crate) struct WorkerThread;

impl WorkerThread {
    /// Spawns a named thread that runs `prepare` first and reports its outcome.
    ///
    /// Returns once the thread has either finished preparing and moved on to
    /// its body, or failed. A failed thread is joined before the error is
    /// returned. The handle yields `None` only for a thread that never
    /// reached its body, which callers never see.
    pub(crate) fn spawn<P, R, E, T>(
        name: &str,
        prepare: P,
    ) -> Result<thread::JoinHandle<Option<T>>, ControllerError>
    where
        P: FnOnce() -> Result<R, E> + Send + 'static,
        R: FnOnce() -> T,
        E: Into<ControllerError> + Send + 'static,
        T: Send + 'static,
    {
        let (status_tx, status_rx) = mpsc::sync_channel(1);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let body = match prepare() {
                    Ok(body) => {
                        let _ = status_tx.send(Ok(()));
                        body
                    }
                    Err(err) => {
                        let _ = status_tx.send(Err(err));
                        return None;
                    }
                };
                Some(body())
            })
            .map_err(ControllerError::Spawn)?;

        match status_rx.recv() {
            Ok(Ok(())) => Ok(handle),
            Ok(Err(err)) => {
                let _ = handle.join();
                Err(err.into())
            }
            Err(_) => {
                let _ = handle.join();
                Err(ControllerError::WorkerLost(name.to_string()))
            }
        }
    }
}
