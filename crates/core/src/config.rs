// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller configuration

use crate::direction::Direction;
use crate::queue::QueueConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Timing, capacity and quorum settings of the coordination engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Hold on yellow / all-stop before the new direction goes green
    #[serde(with = "humantime_serde")]
    pub clearance_interval: Duration,
    /// Hold on the new green before the next transition may be considered
    #[serde(with = "humantime_serde")]
    pub min_green_interval: Duration,
    /// Capacity of normal queue 1, and the load-balancing threshold
    pub normal_queue_capacity: usize,
    /// Capacity of normal queue 2; unbounded when absent
    pub overflow_queue_capacity: Option<usize>,
    /// Signal-client registrations needed before dispatch starts
    pub quorum: usize,
    /// Rows returned by a recent-events query
    pub recent_events_limit: usize,
    /// Direction that is green at startup
    pub initial_direction: Direction,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            clearance_interval: Duration::from_secs(5),
            min_green_interval: Duration::from_secs(5),
            normal_queue_capacity: 5,
            overflow_queue_capacity: None,
            quorum: 2,
            recent_events_limit: 100,
            initial_direction: Direction::A,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_intervals(mut self, clearance: Duration, min_green: Duration) -> Self {
        self.clearance_interval = clearance;
        self.min_green_interval = min_green;
        self
    }

    pub fn with_quorum(mut self, quorum: usize) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn with_queue_capacities(mut self, normal: usize, overflow: Option<usize>) -> Self {
        self.normal_queue_capacity = normal;
        self.overflow_queue_capacity = overflow;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normal_queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "normal_queue_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        if self.overflow_queue_capacity == Some(0) {
            return Err(ConfigError::Invalid {
                field: "overflow_queue_capacity",
                message: "must be at least 1 when set".to_string(),
            });
        }
        if self.quorum == 0 {
            return Err(ConfigError::Invalid {
                field: "quorum",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            normal_capacity: self.normal_queue_capacity,
            overflow_capacity: self.overflow_queue_capacity,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
