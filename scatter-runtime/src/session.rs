use crate::controller::{Controller, ControllerError};
use crate::generator::WorkerReport;
use crate::poller::{DisplayPoller, PollOutcome};
use settings::PipelineSettings;
use slot::{Batch, Status, TransitionError};
use std::str::FromStr;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Status,
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command '{0}' (expected start, pause, resume, stop, status or quit)")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "stop" => Ok(Command::Stop),
            "status" => Ok(Command::Status),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseCommandError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    AlreadyRunning,
    Paused,
    Resumed,
    NotRunning,
    Stopped(Option<WorkerReport>),
    AlreadyStopped,
    Status(Status),
    Quit,
}

impl CommandOutcome {
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CommandOutcome::AlreadyRunning
                | CommandOutcome::NotRunning
                | CommandOutcome::AlreadyStopped
        )
    }

    /// Operator log line for this outcome.
    pub fn message(&self) -> String {
        match self {
            CommandOutcome::Started => "Starting thread... OK".to_string(),
            CommandOutcome::AlreadyRunning => "Warning: Thread already started".to_string(),
            CommandOutcome::Paused => "Pausing thread... OK".to_string(),
            CommandOutcome::Resumed => "Resuming thread... OK".to_string(),
            CommandOutcome::NotRunning => "Warning: Thread is not running".to_string(),
            CommandOutcome::Stopped(_) => "Completing thread... OK".to_string(),
            CommandOutcome::AlreadyStopped => "Warning: Thread already finished".to_string(),
            CommandOutcome::Status(status) => format!("Status: {status}"),
            CommandOutcome::Quit => "Quitting".to_string(),
        }
    }
}

/// Headless driver standing in for the button and timer wiring of a UI.
pub struct Session {
    controller: Controller,
    poller: DisplayPoller,
    pause_toggle: bool,
}

impl Session {
    pub fn new(settings: PipelineSettings) -> Result<Self, ControllerError> {
        Ok(Self {
            controller: Controller::new(settings)?,
            poller: DisplayPoller::new(),
            pause_toggle: false,
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn poller(&self) -> &DisplayPoller {
        &self.poller
    }

    pub fn display(&self) -> &Batch {
        self.poller.display()
    }

    pub fn poll_period(&self) -> Duration {
        self.controller.settings().poll_period()
    }

    /// Mirrors a checkable pause button: reset whenever pausing is refused or
    /// the run stops.
    pub fn pause_toggle(&self) -> bool {
        self.pause_toggle
    }

    /// Applies a control command. State conflicts come back as warning
    /// outcomes; only failures to launch the generator are errors.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, ControllerError> {
        match command {
            Command::Start => match self.controller.start() {
                Ok(()) => Ok(CommandOutcome::Started),
                Err(ControllerError::Transition(TransitionError::AlreadyRunning)) => {
                    Ok(CommandOutcome::AlreadyRunning)
                }
                Err(err) => Err(err),
            },
            Command::Pause | Command::Resume => {
                let paused = command == Command::Pause;
                match self.controller.pause(paused) {
                    Ok(()) => {
                        self.pause_toggle = paused;
                        Ok(if paused {
                            CommandOutcome::Paused
                        } else {
                            CommandOutcome::Resumed
                        })
                    }
                    Err(ControllerError::Transition(_)) => {
                        self.pause_toggle = false;
                        Ok(CommandOutcome::NotRunning)
                    }
                    Err(err) => Err(err),
                }
            }
            Command::Stop => {
                let outcome = match self.controller.stop() {
                    Ok(report) => CommandOutcome::Stopped(report),
                    Err(ControllerError::Transition(_)) => CommandOutcome::AlreadyStopped,
                    Err(err) => return Err(err),
                };
                self.poller.clear();
                self.pause_toggle = false;
                Ok(outcome)
            }
            Command::Status => Ok(CommandOutcome::Status(self.controller.status())),
            Command::Quit => Ok(CommandOutcome::Quit),
        }
    }

    /// One timer tick: drain the slot and refresh the display set.
    pub fn tick(&mut self) -> PollOutcome {
        self.poller.poll(&self.controller)
    }

    /// Ticks every poll period until `duration` has elapsed, calling
    /// `on_update` after each display refresh. Returns the number of refreshes.
    pub fn run_for_duration<F>(&mut self, duration: Duration, mut on_update: F) -> u64
    where
        F: FnMut(&DisplayPoller),
    {
        let period = self.poll_period();
        let start = Instant::now();
        let mut refreshed = 0;
        loop {
            let remaining = duration.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(period.min(remaining));
            if self.tick() == PollOutcome::Updated {
                refreshed += 1;
                on_update(&self.poller);
            }
        }
        refreshed
    }
}

/// Schedules poller ticks for a driver that also waits on other input.
///
/// The next tick is always one full period after the previous one fired, so
/// a slow command delays polling instead of causing a burst of late ticks.
#[derive(Debug, Clone, Copy)]
pub struct PollTimer {
    period: Duration,
    next: Instant,
}

impl PollTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Time left until the next tick is due; zero when it is overdue.
    pub fn remaining(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    pub fn is_due(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Records a tick and schedules the next one a full period from now.
    pub fn fired(&mut self) {
        self.next = Instant::now() + self.period;
    }
}
