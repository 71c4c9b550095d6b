// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller status

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use wg_daemon::protocol::ControllerStatus;

use crate::client::DaemonClient;
use crate::output::{print, OutputFormat};

#[derive(Serialize)]
struct StatusReport {
    daemon_version: String,
    uptime_secs: u64,
    #[serde(flatten)]
    status: ControllerStatus,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = &self.status;
        let snapshot = &status.snapshot;
        writeln!(f, "{:<12} {}", "Daemon:", self.daemon_version)?;
        writeln!(f, "{:<12} {}s", "Uptime:", self.uptime_secs)?;
        writeln!(f, "{:<12} {}", "Active:", snapshot.active)?;
        writeln!(
            f,
            "{:<12} {}",
            "Transition:",
            if snapshot.in_transition { "yes" } else { "no" }
        )?;
        match &status.arbiter_holder {
            Some(holder) => writeln!(f, "{:<12} held by {}", "Arbiter:", holder)?,
            None => writeln!(f, "{:<12} free", "Arbiter:")?,
        }
        writeln!(
            f,
            "{:<12} {}",
            "Dispatch:",
            if status.dispatching { "running" } else { "waiting for quorum" }
        )?;

        let signals: Vec<String> = status
            .signal_clients
            .iter()
            .map(|r| format!("{} ({})", r.client_id, r.direction))
            .collect();
        let signals = if signals.is_empty() {
            "none".to_string()
        } else {
            signals.join(", ")
        };
        writeln!(f, "{:<12} {}", "Signals:", signals)?;
        writeln!(f, "{:<12} {}", "Operators:", status.operators)?;

        let queues = &status.queues;
        writeln!(
            f,
            "{:<12} vip {}, queue 1 {}, queue 2 {} (filling queue {})",
            "Queues:",
            queues.vip.len(),
            queues.normal1.len(),
            queues.normal2.len(),
            if queues.use_queue1 { 1 } else { 2 }
        )?;

        writeln!(f)?;
        writeln!(f, "{:<10} {:<10} {:<10}", "DIRECTION", "ROAD", "PEDESTRIAN")?;
        for (direction, phases) in &snapshot.directions {
            writeln!(
                f,
                "{:<10} {:<10} {:<10}",
                direction.as_str(),
                phases.road.label(),
                phases.pedestrian.label()
            )?;
        }
        Ok(())
    }
}

pub async fn handle(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let daemon_version = client.hello().await?;
    let (status, uptime_secs) = client.status().await?;
    print(
        &StatusReport {
            daemon_version,
            uptime_secs,
            status,
        },
        format,
    );
    Ok(())
}
