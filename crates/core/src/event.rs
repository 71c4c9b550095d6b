// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observable events emitted by the coordination state machines
//!
//! Every event is logged. Transitions, priority dispatches and manual
//! overrides additionally produce audit text.

use crate::coordination::Initiator;
use crate::direction::Direction;
use crate::queue::QueueTier;
use serde::{Deserialize, Serialize};

/// How loudly an event should be logged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    // Registration events
    SignalClientRegistered {
        client_id: String,
        direction: Direction,
        registered: usize,
        quorum: usize,
    },
    QuorumReached {
        registered: usize,
    },
    OperatorRegistered {
        registration_id: String,
        operator_id: Option<String>,
    },
    OperatorDropped {
        registration_id: String,
        error: String,
    },
    SignalClientUnreachable {
        client_id: String,
        error: String,
    },

    // Queue events
    DemandQueued {
        client_id: String,
        direction: Direction,
        tier: QueueTier,
    },
    DemandDropped {
        client_id: String,
        direction: Direction,
    },
    QueueRebalanced {
        selected: QueueTier,
    },
    DemandDispatched {
        client_id: String,
        direction: Direction,
        tier: QueueTier,
    },
    DemandSkipped {
        client_id: String,
        direction: Direction,
        reason: String,
    },
    DemandRequeued {
        client_id: String,
        direction: Direction,
    },

    // Mutex protocol events
    MutexRequested {
        requester: Direction,
        clock: u64,
    },
    MutexGranted {
        requester: Direction,
        peer: Direction,
        peer_clock: u64,
    },
    MutexDeferred {
        requester: Direction,
        peer: Direction,
        peer_clock: u64,
    },

    // Arbiter gate events
    GateAcquired {
        holder: Initiator,
    },
    GateReleased {
        holder: Initiator,
    },
    GateDenied {
        holder: Initiator,
        current: Initiator,
    },

    // Transition events
    TransitionStarted {
        from: Direction,
        to: Direction,
        initiator: Initiator,
    },
    TransitionCommitted {
        active: Direction,
    },
    TransitionCompleted {
        active: Direction,
    },

    // Override events
    OverrideRequested {
        operator_id: String,
        direction: Direction,
    },
    OverrideAccepted {
        operator_id: String,
        direction: Direction,
    },
    OverrideRejected {
        operator_id: String,
        direction: Direction,
        reason: String,
    },
}

impl Event {
    /// Get the event name for filtering
    /// Format: "category:action"
    pub fn name(&self) -> &'static str {
        match self {
            Event::SignalClientRegistered { .. } => "client:registered",
            Event::QuorumReached { .. } => "client:quorum",
            Event::OperatorRegistered { .. } => "operator:registered",
            Event::OperatorDropped { .. } => "operator:dropped",
            Event::SignalClientUnreachable { .. } => "client:unreachable",

            Event::DemandQueued { .. } => "demand:queued",
            Event::DemandDropped { .. } => "demand:dropped",
            Event::QueueRebalanced { .. } => "queue:rebalanced",
            Event::DemandDispatched { .. } => "demand:dispatched",
            Event::DemandSkipped { .. } => "demand:skipped",
            Event::DemandRequeued { .. } => "demand:requeued",

            Event::MutexRequested { .. } => "mutex:requested",
            Event::MutexGranted { .. } => "mutex:granted",
            Event::MutexDeferred { .. } => "mutex:deferred",

            Event::GateAcquired { .. } => "gate:acquired",
            Event::GateReleased { .. } => "gate:released",
            Event::GateDenied { .. } => "gate:denied",

            Event::TransitionStarted { .. } => "transition:started",
            Event::TransitionCommitted { .. } => "transition:committed",
            Event::TransitionCompleted { .. } => "transition:completed",

            Event::OverrideRequested { .. } => "override:requested",
            Event::OverrideAccepted { .. } => "override:accepted",
            Event::OverrideRejected { .. } => "override:rejected",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::DemandDropped { .. }
            | Event::SignalClientUnreachable { .. }
            | Event::OperatorDropped { .. } => Severity::Warn,

            Event::MutexRequested { .. }
            | Event::MutexGranted { .. }
            | Event::MutexDeferred { .. }
            | Event::GateAcquired { .. }
            | Event::GateReleased { .. }
            | Event::GateDenied { .. }
            | Event::DemandQueued { .. } => Severity::Debug,

            _ => Severity::Info,
        }
    }

    /// Human-readable line for the audit sink, if this event is audited
    pub fn audit_text(&self) -> Option<String> {
        let text = match self {
            Event::TransitionStarted {
                from,
                to,
                initiator,
            } => format!("TRANSITION: {} -> {} started by {}", from, to, initiator),
            Event::TransitionCommitted { active } => {
                format!("TRANSITION: {} granted right-of-way", active)
            }
            Event::TransitionCompleted { active } => {
                format!("TRANSITION: complete, active direction is {}", active)
            }
            Event::DemandDispatched {
                client_id,
                direction,
                tier: QueueTier::Vip,
            } => format!(
                "PRIORITY: dispatching VIP request from {} for {}",
                client_id, direction
            ),
            Event::OverrideRequested {
                operator_id,
                direction,
            } => format!(
                "Manual override to {} requested by {}",
                direction, operator_id
            ),
            Event::OverrideAccepted {
                operator_id,
                direction,
            } => format!(
                "Manual override to {} initiated by {}",
                direction, operator_id
            ),
            Event::OverrideRejected {
                operator_id,
                direction,
                reason,
            } => format!(
                "Manual override to {} by {} rejected: {}",
                direction, operator_id, reason
            ),
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
