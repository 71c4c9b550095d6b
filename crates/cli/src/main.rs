// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wg - Wayguard CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod demand;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{events, operator, signal, status};

use crate::client::{daemon_addr, DaemonClient};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "wg",
    version,
    about = "Wayguard - right-of-way controller for a two-way intersection"
)]
struct Cli {
    /// Daemon address [default: $WG_ADDR or 127.0.0.1:7420]
    #[arg(long, global = true)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a signal client for one direction
    Signal(signal::SignalArgs),
    /// Submit a single demand
    Demand(signal::DemandArgs),
    /// Operator console
    Operator {
        #[command(subcommand)]
        command: operator::OperatorCommand,
    },
    /// Request a manual switch to a direction
    Override(operator::OverrideArgs),
    /// Show recent audit events, newest first
    Events {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show controller status
    Status {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Stop the daemon
    Shutdown,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let client = DaemonClient::new(daemon_addr(cli.addr, std::env::var("WG_ADDR").ok()));

    match cli.command {
        Commands::Signal(args) => signal::run(&client, args).await?,
        Commands::Demand(args) => signal::demand(&client, args).await?,
        Commands::Operator { command } => operator::handle(&client, command).await?,
        Commands::Override(args) => operator::request_override(&client, args).await?,
        Commands::Events { format } => events::handle(&client, format).await?,
        Commands::Status { format } => status::handle(&client, format).await?,
        Commands::Shutdown => {
            client.shutdown().await?;
            println!("Daemon shutting down");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `WG_LOG` sets the filter
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("WG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
