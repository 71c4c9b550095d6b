// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator console commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use wg_core::Direction;
use wg_daemon::Push;

use crate::client::{DaemonClient, OverrideReply};
use crate::output::format_snapshot;

#[derive(Subcommand)]
pub enum OperatorCommand {
    /// Register a console and print status snapshots and acknowledgements
    Watch {
        /// Operator id; override acknowledgements are routed by it
        #[arg(long)]
        operator: Option<String>,
    },
}

#[derive(Args)]
pub struct OverrideArgs {
    /// Direction to switch to (A or B)
    pub direction: Direction,
    /// Operator requesting the switch
    #[arg(long)]
    pub operator: String,
}

pub async fn handle(client: &DaemonClient, command: OperatorCommand) -> Result<()> {
    match command {
        OperatorCommand::Watch { operator } => watch(client, operator.as_deref()).await,
    }
}

async fn watch(client: &DaemonClient, operator: Option<&str>) -> Result<()> {
    let mut subscription = client.register_operator(operator).await?;
    println!("Registered console {}", subscription.id());

    loop {
        tokio::select! {
            push = subscription.next() => match push {
                Some(Push::StatusSnapshot { snapshot }) => println!("{}", format_snapshot(&snapshot)),
                Some(Push::Acknowledge { message }) => println!("ack: {}", message),
                Some(Push::StateChanged { .. }) => {}
                None => bail!("daemon closed the connection"),
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

/// Request a manual switch; a rejection exits non-zero
pub async fn request_override(client: &DaemonClient, args: OverrideArgs) -> Result<()> {
    match client
        .request_override(args.direction, &args.operator)
        .await?
    {
        OverrideReply::Accepted => {
            println!("Override to {} accepted", args.direction);
            Ok(())
        }
        OverrideReply::Rejected(reason) => {
            bail!("Override to {} rejected: {}", args.direction, reason)
        }
    }
}
