use settings::{PipelineSettings, SettingsError, ValueRange};
use std::time::Duration;

#[test]
fn defaults_match_widget_constants() {
    let settings = PipelineSettings::default();
    assert_eq!(settings.value_range, ValueRange::new(0, 200));
    assert_eq!(settings.batch_size, 100);
    assert_eq!(settings.retry_delay(), Duration::from_millis(200));
    assert_eq!(settings.poll_period(), Duration::from_millis(500));
    assert!(settings.seed.is_none());
    assert!(settings.validate().is_ok());
}

#[test]
fn value_range_is_half_open() {
    let range = ValueRange::new(10, 20);
    assert!(!range.contains(9));
    assert!(range.contains(10));
    assert!(range.contains(19));
    assert!(!range.contains(20));
    assert!(!range.is_empty());
    assert!(ValueRange::new(5, 5).is_empty());
}

#[test]
fn validate_rejects_empty_range() {
    let settings = PipelineSettings {
        value_range: ValueRange::new(50, 50),
        ..PipelineSettings::default()
    };
    assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
}

#[test]
fn validate_rejects_zero_batch_and_periods() {
    let zero_batch = PipelineSettings {
        batch_size: 0,
        ..PipelineSettings::default()
    };
    assert!(zero_batch.validate().is_err());

    let zero_retry = PipelineSettings {
        retry_delay_ms: 0,
        ..PipelineSettings::default()
    };
    assert!(zero_retry.validate().is_err());

    let zero_poll = PipelineSettings {
        poll_period_ms: 0,
        ..PipelineSettings::default()
    };
    assert!(zero_poll.validate().is_err());
}

#[test]
fn save_and_load_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pipeline.json");

    let settings = PipelineSettings {
        value_range: ValueRange::new(5, 60),
        batch_size: 32,
        retry_delay_ms: 25,
        poll_period_ms: 75,
        seed: None,
    }
    .with_seed(7);

    settings.save_to_file(&path).unwrap();
    let loaded = PipelineSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.seed, Some(7));
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "batch_size": 10 }"#).unwrap();

    let loaded = PipelineSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded.batch_size, 10);
    assert_eq!(loaded.value_range, ValueRange::default());
    assert_eq!(loaded.poll_period_ms, 500);
}

#[test]
fn load_reports_invalid_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        PipelineSettings::load_from_file(&path),
        Err(SettingsError::Json(_))
    ));

    std::fs::write(&path, r#"{ "value_range": { "low": 9, "high": 3 } }"#).unwrap();
    assert!(matches!(
        PipelineSettings::load_from_file(&path),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        PipelineSettings::load_from_file(dir.path().join("missing.json")),
        Err(SettingsError::Io(_))
    ));
}
