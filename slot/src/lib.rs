mod batch;
mod shared;

pub use batch::{Batch, Point};
pub use shared::{Publish, SharedSlot};

use serde::{Deserialize, Serialize};

/// Run-control flag shared by the generator and the display poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Started,
    Paused,
    #[default]
    Finished,
}

impl Status {
    pub fn is_running(self) -> bool {
        !matches!(self, Status::Finished)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Started => "started",
            Status::Paused => "paused",
            Status::Finished => "finished",
        };
        f.write_str(label)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("thread already started")]
    AlreadyRunning,
    #[error("thread already finished")]
    AlreadyStopped,
    #[error("generator is not running")]
    NotRunning,
}
