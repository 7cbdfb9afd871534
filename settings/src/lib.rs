use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_VALUE_LOW: u32 = 0;
pub const DEFAULT_VALUE_HIGH: u32 = 200;
pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;
pub const DEFAULT_POLL_PERIOD_MS: u64 = 500;

/// Half-open coordinate range `[low, high)` for generated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: u32,
    pub high: u32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            low: DEFAULT_VALUE_LOW,
            high: DEFAULT_VALUE_HIGH,
        }
    }
}

impl ValueRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.low..self.high).contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.low >= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub value_range: ValueRange,
    pub batch_size: usize,
    pub retry_delay_ms: u64,
    pub poll_period_ms: u64,
    pub seed: Option<u64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            value_range: ValueRange::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            seed: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl PipelineSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.poll_period_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.value_range.is_empty() {
            return Err(SettingsError::Invalid(format!(
                "value_range is empty: low {} must be below high {}",
                self.value_range.low, self.value_range.high
            )));
        }
        if self.batch_size == 0 {
            return Err(SettingsError::Invalid(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.retry_delay_ms == 0 {
            return Err(SettingsError::Invalid(
                "retry_delay_ms must be at least 1".to_string(),
            ));
        }
        if self.poll_period_ms == 0 {
            return Err(SettingsError::Invalid(
                "poll_period_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Reads settings from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let data = fs::read(path)?;
        let settings: Self = serde_json::from_slice(&data)?;
        settings.validate()?;
        Ok(settings)
    }
}
