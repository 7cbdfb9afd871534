mod worker_thread;
pub mod controller;
pub mod generator;
pub mod poller;
pub mod session;

pub use controller::{Controller, ControllerError};
pub use generator::{GeneratorError, GeneratorWorker, PointGenerator, WorkerReport};
pub use poller::{BatchSource, DisplayPoller, PollOutcome};
pub use session::{Command, CommandOutcome, ParseCommandError, PollTimer, Session};

pub use settings::{PipelineSettings, SettingsError, ValueRange};
pub use slot::{Batch, Point, SharedSlot, Status, TransitionError};
