// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;

use crate::client::DaemonClient;
use crate::output::{print_list, OutputFormat};

/// Print recent audit events, newest first
pub async fn handle(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let events = client.recent_events().await?;
    if events.is_empty() && matches!(format, OutputFormat::Text) {
        println!("No events recorded.");
        return Ok(());
    }
    print_list(&events, format);
    Ok(())
}
