// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out pushes to registered collaborators
//!
//! Each push iterates a snapshot of the registry, so registrations that
//! arrive mid-broadcast neither block nor are blocked. A failed target is
//! reported as an event and never stops delivery to the rest.

use crate::registry::ClientRegistry;
use wg_core::{Event, SignalUpdate, StatusSnapshot};

/// Push a phase change to every signal client of the update's direction
pub(crate) async fn push_update(registry: &ClientRegistry, update: SignalUpdate) -> Vec<Event> {
    let mut events = Vec::new();
    for client in registry.signal_clients_for(update.direction) {
        if let Err(e) = client.on_state_changed(update).await {
            events.push(Event::SignalClientUnreachable {
                client_id: client.client_id().to_string(),
                error: e.to_string(),
            });
        }
    }
    events
}

/// Push a status snapshot to every operator console, dropping unreachable ones
pub(crate) async fn push_snapshot(registry: &ClientRegistry, snapshot: &StatusSnapshot) -> Vec<Event> {
    let mut events = Vec::new();
    for (registration_id, console) in registry.operators() {
        if let Err(e) = console.on_status_snapshot(snapshot).await {
            registry.remove_operator(&registration_id);
            events.push(Event::OperatorDropped {
                registration_id,
                error: e.to_string(),
            });
        }
    }
    events
}

/// Deliver an acknowledgement to the consoles of one operator
pub(crate) async fn acknowledge(
    registry: &ClientRegistry,
    operator_id: &str,
    message: &str,
) -> Vec<Event> {
    let mut events = Vec::new();
    for (registration_id, console) in registry.operators_with_id(operator_id) {
        if let Err(e) = console.acknowledge(message).await {
            registry.remove_operator(&registration_id);
            events.push(Event::OperatorDropped {
                registration_id,
                error: e.to_string(),
            });
        }
    }
    events
}

#[cfg(test)]
#[path = "broadcast_tests.rs"]
mod tests;
