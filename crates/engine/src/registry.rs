// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of connected signal clients and operator consoles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use wg_adapters::{OperatorConsole, SignalClient};
use wg_core::Direction;

/// A registered signal client, as reported in status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRegistration {
    pub client_id: String,
    pub direction: Direction,
}

struct SignalEntry {
    client: Arc<dyn SignalClient>,
    direction: Direction,
}

/// Concurrent registry, independent of the arbiter lock.
///
/// Signal clients stay registered for the controller's lifetime (a client
/// registering again under the same id replaces its handle). Operator
/// consoles are keyed by registration id and removed when a push fails.
#[derive(Default)]
pub struct ClientRegistry {
    signals: RwLock<HashMap<String, SignalEntry>>,
    operators: RwLock<HashMap<String, Arc<dyn OperatorConsole>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a signal client; returns the number of registered clients
    pub fn register_signal(&self, client: Arc<dyn SignalClient>, direction: Direction) -> usize {
        let mut signals = self.signals.write().unwrap_or_else(|e| e.into_inner());
        signals.insert(
            client.client_id().to_string(),
            SignalEntry { client, direction },
        );
        signals.len()
    }

    pub fn signal_count(&self) -> usize {
        self.signals.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Clients showing the given direction
    pub fn signal_clients_for(&self, direction: Direction) -> Vec<Arc<dyn SignalClient>> {
        self.signals
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|entry| entry.direction == direction)
            .map(|entry| Arc::clone(&entry.client))
            .collect()
    }

    /// All signal registrations, sorted by client id
    pub fn signal_registrations(&self) -> Vec<SignalRegistration> {
        let mut registrations: Vec<_> = self
            .signals
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(id, entry)| SignalRegistration {
                client_id: id.clone(),
                direction: entry.direction,
            })
            .collect();
        registrations.sort_by(|a, b| a.client_id.cmp(&b.client_id));
        registrations
    }

    pub fn register_operator(&self, registration_id: String, console: Arc<dyn OperatorConsole>) {
        self.operators
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(registration_id, console);
    }

    /// Remove an operator; returns whether it was registered
    pub fn remove_operator(&self, registration_id: &str) -> bool {
        self.operators
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(registration_id)
            .is_some()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Snapshot of every operator registration
    pub fn operators(&self) -> Vec<(String, Arc<dyn OperatorConsole>)> {
        self.operators
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(id, console)| (id.clone(), Arc::clone(console)))
            .collect()
    }

    /// Consoles registered under an operator identity
    pub fn operators_with_id(&self, operator_id: &str) -> Vec<(String, Arc<dyn OperatorConsole>)> {
        self.operators()
            .into_iter()
            .filter(|(_, console)| console.operator_id() == Some(operator_id))
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
