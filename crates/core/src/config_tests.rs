// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_document_uses_defaults() {
    let config = ControllerConfig::from_toml("").unwrap();
    assert_eq!(config, ControllerConfig::default());
    assert_eq!(config.clearance_interval, Duration::from_secs(5));
    assert_eq!(config.quorum, 2);
    assert_eq!(config.recent_events_limit, 100);
}

#[test]
fn parses_humantime_durations_and_capacities() {
    let config = ControllerConfig::from_toml(
        r#"
        clearance_interval = "3s"
        min_green_interval = "1500ms"
        normal_queue_capacity = 8
        overflow_queue_capacity = 20
        initial_direction = "B"
        "#,
    )
    .unwrap();

    assert_eq!(config.clearance_interval, Duration::from_secs(3));
    assert_eq!(config.min_green_interval, Duration::from_millis(1500));
    assert_eq!(
        config.queue_config(),
        QueueConfig {
            normal_capacity: 8,
            overflow_capacity: Some(20)
        }
    );
    assert_eq!(config.initial_direction, Direction::B);
}

#[test]
fn rejects_unknown_keys() {
    assert!(matches!(
        ControllerConfig::from_toml("clearence = \"1s\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn rejects_zero_capacity() {
    let err = ControllerConfig::from_toml("normal_queue_capacity = 0").unwrap_err();
    assert!(err.to_string().contains("normal_queue_capacity"));
}

#[test]
fn rejects_zero_quorum() {
    let config = ControllerConfig::default().with_quorum(0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "quorum", .. })
    ));
}
