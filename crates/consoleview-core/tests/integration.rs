//! Integration tests for consoleview-core.
//!
//! These tests verify the public API works correctly end-to-end.

use consoleview_core::format::{format_duration, format_percentage};
use consoleview_core::{Duration, SortColumn, Timestamp, ViewConfig};

// =============================================================================
// Duration Integration Tests
// =============================================================================

#[test]
fn test_duration_rendering_examples() {
    assert_eq!(Duration::new(0, 125_000_000).to_string(), "125.00ms");
    assert_eq!(Duration::new(65, 0).to_string(), "1m 5s");
    assert_eq!(Duration::new(0, 0).to_string(), "0ns");
}

#[test]
fn test_from_nanos_one_second() {
    assert_eq!(Duration::from_nanos(1_000_000_000), Duration::new(1, 0));
}

#[test]
fn test_negative_half_second_representation() {
    let d = Duration::new(0, -500_000_000);
    assert_eq!((d.seconds(), d.nanos()), (-1, 500_000_000));
    assert!(d.is_negative());
    assert_eq!(d.as_secs_f64(), -0.5);
}

#[test]
fn test_sorting_by_key_and_by_ord_agree() {
    let mut by_ord = vec![
        Duration::from_millis(1_500),
        Duration::new(0, 999),
        Duration::from_secs(3_600),
        Duration::new(-1, 0),
    ];
    let mut by_key = by_ord.clone();

    by_ord.sort();
    by_key.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

    assert_eq!(by_ord, by_key);
    assert_eq!(by_ord[0], Duration::new(-1, 0));
}

#[test]
fn test_duration_json_normalizes_on_read() {
    let d: Duration = serde_json::from_str(r#"{"seconds": 1, "nanos": -250000000}"#).unwrap();
    assert_eq!(d, Duration::new(0, 750_000_000));
    assert_eq!(
        serde_json::to_string(&d).unwrap(),
        r#"{"seconds":0,"nanos":750000000}"#
    );
}

#[test]
fn test_timestamp_json_overflow_is_rejected() {
    let json = format!(r#"{{"seconds": {}, "nanos": 1000000000}}"#, i64::MAX);
    assert!(serde_json::from_str::<Timestamp>(&json).is_err());
}

// =============================================================================
// Formatting Integration Tests
// =============================================================================

#[test]
fn test_percentage_of_elapsed() {
    let elapsed = Timestamp::new(1_010, 0) - Timestamp::new(1_000, 0);
    let busy = Duration::from_secs(4);
    let pct = busy.as_micros_f64() / elapsed.as_micros_f64() * 100.0;
    assert_eq!(format_percentage(pct), "40.00%");
    assert_eq!(format_duration(elapsed, 2), "10.00s");
}

// =============================================================================
// Config Integration Tests
// =============================================================================

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "duration_precision = 3\nsort_by = \"scheduled\"\ndescending = false\n")
        .unwrap();

    let config = ViewConfig::load_from_file(&path).unwrap();
    assert_eq!(config.duration_precision, 3);
    assert_eq!(config.sort_by, SortColumn::Scheduled);
    assert!(!config.descending);
}

#[test]
fn test_config_paths_end_with_config_file() {
    for path in ViewConfig::config_paths() {
        assert!(path.ends_with(ViewConfig::CONFIG_FILE));
    }
}
