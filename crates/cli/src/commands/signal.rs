// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal client commands: run a signal head, or submit a single demand

use anyhow::{bail, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{interval_at, Instant};
use wg_core::Direction;
use wg_daemon::Push;

use crate::client::DaemonClient;
use crate::demand::DemandGenerator;
use crate::output::format_admission;

#[derive(Args)]
pub struct SignalArgs {
    /// Direction this signal head serves (A or B)
    pub direction: Direction,
    /// Client id [default: Pair_<direction>]
    #[arg(long)]
    pub id: Option<String>,
    /// Print state changes without generating demands
    #[arg(long)]
    pub no_demands: bool,
}

#[derive(Args)]
pub struct DemandArgs {
    /// Direction requesting right-of-way (A or B)
    pub direction: Direction,
    /// Client id [default: Pair_<direction>]
    #[arg(long)]
    pub id: Option<String>,
    /// Mark the demand as VIP
    #[arg(long)]
    pub vip: bool,
    /// Distance of the approaching traffic
    #[arg(long, default_value_t = 50)]
    pub proximity: u32,
}

fn client_id(id: Option<String>, direction: Direction) -> String {
    id.unwrap_or_else(|| format!("Pair_{}", direction))
}

/// Register, then print state changes and submit demands until Ctrl-C
pub async fn run(client: &DaemonClient, args: SignalArgs) -> Result<()> {
    let direction = args.direction;
    let client_id = client_id(args.id, direction);
    let mut subscription = client.register_signal(&client_id, direction).await?;
    println!(
        "Registered {} for direction {} at {}",
        subscription.id(),
        direction,
        client.addr()
    );

    let mut generator = DemandGenerator::new(StdRng::from_entropy());
    let period = generator.period();
    let mut ticker = interval_at(Instant::now() + period, period);
    if !args.no_demands {
        println!("Submitting demands every {}s", period.as_secs());
    }

    loop {
        tokio::select! {
            push = subscription.next() => match push {
                Some(Push::StateChanged { update }) => {
                    println!("{:<12} {}", update.label(), update.detail());
                }
                Some(other) => tracing::debug!(?other, "ignoring push"),
                None => bail!("daemon closed the connection"),
            },
            _ = ticker.tick(), if !args.no_demands => {
                let demand = generator.next_demand();
                match client
                    .submit_demand(&client_id, direction, demand.is_vip, demand.proximity)
                    .await
                {
                    Ok(tier) => println!(
                        "Demand{} at proximity {} {}",
                        if demand.is_vip { " (VIP)" } else { "" },
                        demand.proximity,
                        format_admission(tier)
                    ),
                    // Keep running; the daemon may come back
                    Err(e) => eprintln!("Demand failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping {}", client_id);
                return Ok(());
            }
        }
    }
}

/// Submit one demand and report where it was queued
pub async fn demand(client: &DaemonClient, args: DemandArgs) -> Result<()> {
    let client_id = client_id(args.id, args.direction);
    let tier = client
        .submit_demand(&client_id, args.direction, args.vip, args.proximity)
        .await?;
    println!("Demand from {} {}", client_id, format_admission(tier));
    Ok(())
}
