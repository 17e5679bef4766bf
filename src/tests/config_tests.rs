use super::*;
use std::io::Write;

#[test]
fn test_default_config_validates() {
    let config = TabScrollConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.top_reset_threshold, 10.0);
    assert_eq!(config.bottom_snap_margin, 100.0);
    assert_eq!(config.scroll_duration(), Duration::from_millis(300));
    assert_eq!(config.easing, Easing::EaseInOut);
}

#[test]
fn test_yaml_overrides_only_given_fields() {
    let yaml = r#"
tab_bar_height: 64
scroll_duration_ms: 450
easing: ease_out
"#;
    let config = TabScrollConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(config.tab_bar_height, 64.0);
    assert_eq!(config.scroll_duration_ms, 450);
    assert_eq!(config.easing, Easing::EaseOut);
    assert_eq!(config.reach_threshold, 56.0);
    assert_eq!(config.event_capacity, 64);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let yaml = "tab_height: 64\n";
    assert!(TabScrollConfig::from_yaml_str(yaml).is_err());
}

#[test]
fn test_negative_metric_fails_validation() {
    let yaml = "reach_threshold: -5\n";
    let err = TabScrollConfig::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("reach_threshold"));
}

#[test]
fn test_zero_event_capacity_fails_validation() {
    let config = TabScrollConfig {
        event_capacity: 0,
        ..TabScrollConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_load_reads_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "top_reset_threshold: 24").unwrap();

    let config = TabScrollConfig::load(file.path()).unwrap();

    assert_eq!(config.top_reset_threshold, 24.0);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    let err = TabScrollConfig::load(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("missing.yaml"));
}

#[test]
fn test_tracker_metrics_carry_config_values() {
    let config = TabScrollConfig {
        tab_bar_height: 48.0,
        bottom_snap_margin: 20.0,
        ..TabScrollConfig::default()
    };

    let metrics = config.tracker_metrics(900.0);

    assert_eq!(metrics.tab_bar_height, 48.0);
    assert_eq!(metrics.max_scroll_extent, 900.0);
    assert_eq!(metrics.bottom_snap_margin, 20.0);
}
