// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The running controller and its RPC operations

use crate::broadcast;
use crate::context::Context;
use crate::dispatch;
use crate::error::EngineError;
use crate::registry::SignalRegistration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::watch;
use wg_adapters::{AuditSink, OperatorConsole, SignalClient};
use wg_core::{
    Admission, AuditEvent, ControllerConfig, DemandRequest, Direction, Event, IdGen, Initiator,
    QueueSnapshot, StatusSnapshot, TransitionRefusal,
};

/// Result of a manual override attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideOutcome {
    Accepted,
    Rejected(OverrideRejection),
}

impl OverrideOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, OverrideOutcome::Accepted)
    }
}

/// Why an override was turned down
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideRejection {
    /// Another party holds the arbiter lock
    Busy(Option<Initiator>),
    AlreadyActive(Direction),
    InTransition,
    /// The controller has stopped accepting transitions
    ShuttingDown,
}

impl fmt::Display for OverrideRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideRejection::Busy(Some(holder)) => {
                write!(f, "busy, a transition is held by {}", holder)
            }
            OverrideRejection::Busy(None) => write!(f, "busy, another transition holds the lock"),
            OverrideRejection::AlreadyActive(d) => write!(f, "direction {} is already active", d),
            OverrideRejection::InTransition => write!(f, "a transition is already in progress"),
            OverrideRejection::ShuttingDown => write!(f, "the controller is shutting down"),
        }
    }
}

impl From<TransitionRefusal> for OverrideRejection {
    fn from(refusal: TransitionRefusal) -> Self {
        match refusal {
            TransitionRefusal::InTransition => OverrideRejection::InTransition,
            TransitionRefusal::AlreadyActive(d) => OverrideRejection::AlreadyActive(d),
        }
    }
}

/// Point-in-time view of the whole controller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStatus {
    pub snapshot: StatusSnapshot,
    pub arbiter_holder: Option<Initiator>,
    pub dispatching: bool,
    pub signal_clients: Vec<SignalRegistration>,
    pub operators: usize,
    pub queues: QueueSnapshot,
}

/// Handle to the coordination engine.
///
/// Cheap to clone; all clones share one context. Must be used from within a
/// tokio runtime, since reaching quorum spawns the dispatch loop.
pub struct Controller<A, I> {
    ctx: Arc<Context<A>>,
    id_gen: I,
}

impl<A, I: Clone> Clone for Controller<A, I> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            id_gen: self.id_gen.clone(),
        }
    }
}

impl<A, I> Controller<A, I>
where
    A: AuditSink,
    I: IdGen,
{
    pub fn new(config: ControllerConfig, audit: A, id_gen: I) -> Self {
        Self {
            ctx: Arc::new(Context::new(config, audit)),
            id_gen,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.ctx.config
    }

    /// Store a signal client and start dispatch once quorum is reached.
    ///
    /// Returns the number of registered signal clients.
    pub async fn register_signal_client(
        &self,
        client: Arc<dyn SignalClient>,
        direction: Direction,
    ) -> usize {
        let client_id = client.client_id().to_string();
        let registered = self.ctx.registry.register_signal(client, direction);
        let quorum = self.ctx.config.quorum;

        self.ctx
            .events
            .emit(Event::SignalClientRegistered {
                client_id,
                direction,
                registered,
                quorum,
            })
            .await;

        if registered >= quorum && !self.ctx.dispatch_started.swap(true, Ordering::SeqCst) {
            self.ctx.events.emit(Event::QuorumReached { registered }).await;
            let task = tokio::spawn(dispatch::run(
                Arc::clone(&self.ctx),
                self.ctx.shutdown.subscribe(),
            ));
            *self
                .ctx
                .dispatch_task
                .lock()
                .unwrap_or_else(|e| e.into_inner()) = Some(task);
        }

        registered
    }

    /// Queue a demand request for dispatch
    pub async fn submit_demand(&self, request: DemandRequest) -> Admission {
        let (admission, events) = self.ctx.queue.submit(request);
        self.ctx.events.emit_all(events).await;
        admission
    }

    /// Store an operator console and push it the current status.
    ///
    /// Returns the registration id.
    pub async fn register_operator(&self, console: Arc<dyn OperatorConsole>) -> String {
        let registration_id = self.id_gen.next();
        let operator_id = console.operator_id().map(str::to_string);
        self.ctx
            .registry
            .register_operator(registration_id.clone(), Arc::clone(&console));
        self.ctx
            .events
            .emit(Event::OperatorRegistered {
                registration_id: registration_id.clone(),
                operator_id,
            })
            .await;

        let snapshot = self.ctx.arbiter.status();
        if let Err(e) = console.on_status_snapshot(&snapshot).await {
            self.ctx.registry.remove_operator(&registration_id);
            self.ctx
                .events
                .emit(Event::OperatorDropped {
                    registration_id: registration_id.clone(),
                    error: e.to_string(),
                })
                .await;
        }

        registration_id
    }

    /// Remove an operator console, e.g. when its connection closes
    pub fn deregister_operator(&self, registration_id: &str) -> bool {
        self.ctx.registry.remove_operator(registration_id)
    }

    /// Attempt a manual switch to `direction`.
    ///
    /// Never waits for the arbiter lock. On acceptance the transition runs in
    /// the background while still holding the lock, so later attempts are
    /// rejected until it completes.
    pub async fn request_override(&self, direction: Direction, operator_id: &str) -> OverrideOutcome {
        let ctx = &self.ctx;
        ctx.events
            .emit(Event::OverrideRequested {
                operator_id: operator_id.to_string(),
                direction,
            })
            .await;

        let outcome = self.attempt_override(direction, operator_id).await;

        let message = match &outcome {
            OverrideOutcome::Accepted => format!("Override to {} accepted", direction),
            OverrideOutcome::Rejected(reason) => {
                ctx.events
                    .emit(Event::OverrideRejected {
                        operator_id: operator_id.to_string(),
                        direction,
                        reason: reason.to_string(),
                    })
                    .await;
                format!("Override to {} rejected: {}", direction, reason)
            }
        };
        let failures = broadcast::acknowledge(&ctx.registry, operator_id, &message).await;
        ctx.events.emit_all(failures).await;

        outcome
    }

    async fn attempt_override(&self, direction: Direction, operator_id: &str) -> OverrideOutcome {
        let ctx = &self.ctx;
        if ctx.is_shutting_down() {
            return OverrideOutcome::Rejected(OverrideRejection::ShuttingDown);
        }

        let initiator = Initiator::operator(operator_id);
        let mut guard = match ctx.arbiter.try_acquire(initiator.clone()) {
            Ok(guard) => guard,
            Err(holder) => return OverrideOutcome::Rejected(OverrideRejection::Busy(holder)),
        };
        if let Err(refusal) = guard.controller.check(direction) {
            return OverrideOutcome::Rejected(refusal.into());
        }

        ctx.events
            .emit(Event::OverrideAccepted {
                operator_id: operator_id.to_string(),
                direction,
            })
            .await;
        let task_ctx = Arc::clone(ctx);
        let mut shutdown = ctx.shutdown.subscribe();
        tokio::spawn(async move {
            // The check above ran under this guard, so it cannot refuse
            let _ = task_ctx
                .switch_to(&mut guard, direction, initiator, &mut shutdown)
                .await;
        });
        OverrideOutcome::Accepted
    }

    /// The most recent audit events, newest first
    pub async fn recent_events(&self) -> Result<Vec<AuditEvent>, EngineError> {
        let limit = self.ctx.config.recent_events_limit;
        Ok(self.ctx.events.audit().read_recent(limit).await?)
    }

    pub fn queue_snapshot(&self) -> QueueSnapshot {
        self.ctx.queue.snapshot()
    }

    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            snapshot: self.ctx.arbiter.status(),
            arbiter_holder: self.ctx.arbiter.holder(),
            dispatching: self.is_dispatching(),
            signal_clients: self.ctx.registry.signal_registrations(),
            operators: self.ctx.registry.operator_count(),
            queues: self.ctx.queue.snapshot(),
        }
    }

    /// Watch published status snapshots
    pub fn subscribe_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.ctx.arbiter.subscribe()
    }

    pub fn is_dispatching(&self) -> bool {
        self.ctx.dispatch_started.load(Ordering::SeqCst) && !self.ctx.is_shutting_down()
    }

    /// Stop dispatching and wait for any in-flight transition to finish
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        if self.ctx.shutdown.send_replace(true) {
            return Ok(());
        }
        tracing::info!("controller shutting down");

        let task = self
            .ctx
            .dispatch_task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(task) = task {
            task.await
                .map_err(|e| EngineError::DispatchFailed(e.to_string()))?;
        }

        // An accepted override may still be running its clearance hold
        drop(self.ctx.arbiter.acquire(Initiator::Dispatcher).await);

        tracing::info!("controller stopped");
        Ok(())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
