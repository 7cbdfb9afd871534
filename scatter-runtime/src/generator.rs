use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use settings::{PipelineSettings, SettingsError, ValueRange};
use slot::{Batch, Point, Publish, SharedSlot};
use std::sync::Arc;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to seed generator from OS entropy: {0}")]
    Entropy(String),
}

/// Draws fixed-size batches of points uniformly from `[low, high)`.
pub struct PointGenerator {
    rng: StdRng,
    range: ValueRange,
    batch_size: usize,
}

impl PointGenerator {
    /// Fails on settings that could not produce a batch, such as an empty
    /// value range.
    pub fn new(settings: &PipelineSettings) -> Result<Self, GeneratorError> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::try_from_os_rng()
                .map_err(|err| GeneratorError::Entropy(err.to_string()))?,
        };
        Ok(Self {
            rng,
            range: settings.value_range,
            batch_size: settings.batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn next_point(&mut self) -> Point {
        let ValueRange { low, high } = self.range;
        Point::new(
            self.rng.random_range(low..high),
            self.rng.random_range(low..high),
        )
    }

    pub fn next_batch(&mut self) -> Batch {
        let mut batch = Batch::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            batch.push(self.next_point());
        }
        batch
    }
}

/// Counters returned by a generator thread when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub generated: u64,
    pub published: u64,
    pub retries: u64,
}

pub struct GeneratorWorker {
    slot: Arc<SharedSlot>,
    generator: PointGenerator,
    retry_delay: Duration,
}

impl GeneratorWorker {
    pub fn new(
        slot: Arc<SharedSlot>,
        settings: &PipelineSettings,
    ) -> Result<Self, GeneratorError> {
        Ok(Self {
            slot,
            generator: PointGenerator::new(settings)?,
            retry_delay: settings.retry_delay(),
        })
    }

    /// Produces batches until the slot reports that the run is finished.
    ///
    /// A rejected batch is kept and offered again once the slot has room,
    /// so at most one generated batch is ever outstanding.
    pub fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport::default();
        let mut held: Option<Batch> = None;
        log::debug!(
            "generator running (batch size {}, retry delay {:?})",
            self.generator.batch_size(),
            self.retry_delay
        );

        loop {
            let batch = match held.take() {
                Some(batch) => batch,
                None => {
                    report.generated += 1;
                    self.generator.next_batch()
                }
            };

            match self.slot.try_publish(batch) {
                Publish::Accepted => {
                    report.published += 1;
                    log::trace!("published batch #{}", report.published);
                }
                Publish::Rejected(batch) => {
                    log::trace!("slot busy, holding batch");
                    held = Some(batch);
                    report.retries += 1;
                    self.slot.wait_for_room(self.retry_delay);
                }
                Publish::Stopped => break,
            }
        }

        log::info!(
            "generator finished: {} generated, {} published",
            report.generated,
            report.published
        );
        report
    }
}
