// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;
use wg_core::{QueueTier, StatusSnapshot};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One line per snapshot: active direction, then road and pedestrian phases
pub fn format_snapshot(snapshot: &StatusSnapshot) -> String {
    let mut line = format!("active {}", snapshot.active);
    if snapshot.in_transition {
        line.push_str(" (transitioning)");
    }
    for (direction, status) in &snapshot.directions {
        let _ = write!(
            line,
            " | {}: road {:<8} ped {}",
            direction,
            status.road.label(),
            status.pedestrian.label()
        );
    }
    line
}

/// Where a submitted demand ended up
pub fn format_admission(tier: Option<QueueTier>) -> String {
    match tier {
        Some(tier) => format!("queued in {}", tier),
        None => "dropped, queues full".to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
