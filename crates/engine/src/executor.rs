// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition executor
//!
//! Drives the controller state machine through one switch while the caller
//! holds the arbiter lock, performing each step's effects in order.

use crate::arbiter::ArbiterGuard;
use crate::broadcast;
use crate::context::Context;
use std::time::Duration;
use tokio::sync::watch;
use wg_adapters::AuditSink;
use wg_core::{ControllerInput, Direction, Effect, Initiator, TransitionRefusal};

impl<A: AuditSink> Context<A> {
    /// Switch right-of-way to `target`.
    ///
    /// Refused without side effects if `target` is already active or a
    /// transition is running. The clearance hold always runs in full; the
    /// minimum-green hold is cut short once shutdown is signalled.
    pub(crate) async fn switch_to(
        &self,
        guard: &mut ArbiterGuard,
        target: Direction,
        initiator: Initiator,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), TransitionRefusal> {
        guard.controller.check(target)?;

        let span = tracing::info_span!("transition", to = %target, initiator = %initiator);
        span.in_scope(|| tracing::info!("starting"));
        let start = tokio::time::Instant::now();

        self.apply(guard, ControllerInput::Begin { target, initiator })
            .await;
        tokio::time::sleep(self.config.clearance_interval).await;

        self.apply(guard, ControllerInput::Commit).await;
        hold(self.config.min_green_interval, shutdown).await;

        self.apply(guard, ControllerInput::Finish).await;

        span.in_scope(|| {
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "completed"
            )
        });
        Ok(())
    }

    async fn apply(&self, guard: &mut ArbiterGuard, input: ControllerInput) {
        let (next, effects) = guard.controller.transition(input);
        guard.controller = next;

        for effect in effects {
            match effect {
                Effect::Emit(event) => self.events.emit(event).await,
                Effect::Broadcast(update) => {
                    let failures = broadcast::push_update(&self.registry, update).await;
                    self.events.emit_all(failures).await;
                }
                Effect::PublishStatus => {
                    let snapshot = guard.controller.snapshot();
                    self.arbiter.publish(snapshot.clone());
                    let failures = broadcast::push_snapshot(&self.registry, &snapshot).await;
                    self.events.emit_all(failures).await;
                }
            }
        }
    }
}

/// Minimum-green hold that ends early on shutdown
async fn hold(duration: Duration, shutdown: &mut watch::Receiver<bool>) {
    if *shutdown.borrow() {
        return;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = shutdown.changed() => {
            tracing::info!("shutdown requested, cutting hold short");
        }
    }
}
