// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automated dispatch loop
//!
//! Pulls demand in tier order, drops stale requests, then takes the arbiter
//! lock, runs the mutex exchange and executes the transition on a grant.
//! A deferred request goes back into the queue for a later cycle.

use crate::context::Context;
use std::sync::Arc;
use tokio::sync::watch;
use wg_adapters::AuditSink;
use wg_core::{Dequeued, Event, Initiator, TransitionRefusal};

pub(crate) async fn run<A: AuditSink>(ctx: Arc<Context<A>>, mut shutdown: watch::Receiver<bool>) {
    tracing::info!("dispatch loop started");

    loop {
        if *shutdown.borrow() {
            break;
        }

        let dequeued = tokio::select! {
            next = ctx.queue.next_for_dispatch() => next,
            _ = shutdown.changed() => continue,
        };
        let Dequeued {
            request,
            tier,
            events,
        } = dequeued;
        // Dispatch is reported once the request actually wins the exchange
        ctx.events
            .emit_all(
                events
                    .into_iter()
                    .filter(|e| !matches!(e, Event::DemandDispatched { .. })),
            )
            .await;

        // Cheap pre-check against the published status, no lock needed
        let status = ctx.arbiter.status();
        let stale = if status.in_transition {
            Some(TransitionRefusal::InTransition)
        } else if status.active == request.direction {
            Some(TransitionRefusal::AlreadyActive(request.direction))
        } else {
            None
        };
        if let Some(refusal) = stale {
            ctx.events
                .emit(Event::DemandSkipped {
                    client_id: request.client_id,
                    direction: request.direction,
                    reason: refusal.to_string(),
                })
                .await;
            continue;
        }

        let mut guard = tokio::select! {
            guard = ctx.arbiter.acquire(Initiator::Dispatcher) => guard,
            _ = shutdown.changed() => continue,
        };

        // State may have moved while waiting for the lock
        if let Err(refusal) = guard.controller.check(request.direction) {
            ctx.events
                .emit(Event::DemandSkipped {
                    client_id: request.client_id,
                    direction: request.direction,
                    reason: refusal.to_string(),
                })
                .await;
            continue;
        }

        let decision = guard.mutex.request_access(request.direction);
        ctx.events.emit_all(decision.events).await;

        if decision.granted {
            ctx.events
                .emit(Event::DemandDispatched {
                    client_id: request.client_id.clone(),
                    direction: request.direction,
                    tier,
                })
                .await;
            // Refusal is ruled out by the check above under the same guard
            let _ = ctx
                .switch_to(
                    &mut guard,
                    request.direction,
                    Initiator::Dispatcher,
                    &mut shutdown,
                )
                .await;
        } else {
            drop(guard);
            let (_, events) = ctx.queue.requeue(request);
            ctx.events.emit_all(events).await;
        }
    }

    tracing::info!("dispatch loop stopped");
}
