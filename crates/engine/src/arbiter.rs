// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access arbiter
//!
//! One exclusive lock serializes every transition-triggering party: the
//! dispatch loop waits for it, overrides only try it. The lock owns the
//! controller state and both logical processes, so neither can change
//! without holding it. A [`Gate`] mirrors the current holder for reporting.

use crate::events::log_event;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, OwnedMutexGuard};
use wg_core::{
    ControllerState, Direction, Gate, GateInput, Initiator, MutexCoordinator, StatusSnapshot,
};

/// State guarded by the arbiter lock
#[derive(Debug)]
pub struct ArbiterState {
    pub controller: ControllerState,
    pub mutex: MutexCoordinator,
}

pub struct AccessArbiter {
    lock: Arc<tokio::sync::Mutex<ArbiterState>>,
    gate: Arc<Mutex<Gate>>,
    status: watch::Sender<StatusSnapshot>,
}

impl AccessArbiter {
    pub fn new(initial: Direction) -> Self {
        let controller = ControllerState::new(initial);
        let (status, _) = watch::channel(controller.snapshot());
        Self {
            lock: Arc::new(tokio::sync::Mutex::new(ArbiterState {
                controller,
                mutex: MutexCoordinator::new(),
            })),
            gate: Arc::new(Mutex::new(Gate::new())),
            status,
        }
    }

    /// Take the lock without waiting.
    ///
    /// On contention returns the current holder, if the gate has one recorded.
    pub fn try_acquire(&self, holder: Initiator) -> Result<ArbiterGuard, Option<Initiator>> {
        match Arc::clone(&self.lock).try_lock_owned() {
            Ok(state) => Ok(self.enter(state, holder)),
            Err(_) => {
                let gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
                let (_, events) = gate.transition(GateInput::Acquire { holder });
                events.iter().for_each(log_event);
                Err(gate.holder().cloned())
            }
        }
    }

    /// Wait for the lock
    pub async fn acquire(&self, holder: Initiator) -> ArbiterGuard {
        let state = Arc::clone(&self.lock).lock_owned().await;
        self.enter(state, holder)
    }

    fn enter(&self, state: OwnedMutexGuard<ArbiterState>, holder: Initiator) -> ArbiterGuard {
        {
            let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
            let (next, events) = gate.transition(GateInput::Acquire {
                holder: holder.clone(),
            });
            *gate = next;
            events.iter().for_each(log_event);
        }
        ArbiterGuard {
            state,
            gate: Arc::clone(&self.gate),
            holder,
        }
    }

    /// Who holds the lock right now
    pub fn holder(&self) -> Option<Initiator> {
        self.gate
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .holder()
            .cloned()
    }

    /// Latest published status, readable without the lock
    pub fn status(&self) -> StatusSnapshot {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.status.subscribe()
    }

    pub(crate) fn publish(&self, snapshot: StatusSnapshot) {
        self.status.send_replace(snapshot);
    }
}

/// Exclusive access to the arbiter state.
///
/// Dropping the guard releases the lock, including when the holding task
/// is cancelled.
pub struct ArbiterGuard {
    state: OwnedMutexGuard<ArbiterState>,
    gate: Arc<Mutex<Gate>>,
    holder: Initiator,
}

impl ArbiterGuard {
    pub fn holder(&self) -> &Initiator {
        &self.holder
    }
}

impl Deref for ArbiterGuard {
    type Target = ArbiterState;

    fn deref(&self) -> &ArbiterState {
        &self.state
    }
}

impl DerefMut for ArbiterGuard {
    fn deref_mut(&mut self) -> &mut ArbiterState {
        &mut self.state
    }
}

impl Drop for ArbiterGuard {
    fn drop(&mut self) {
        let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        let (next, events) = gate.transition(GateInput::Release {
            holder: self.holder.clone(),
        });
        *gate = next;
        events.iter().for_each(log_event);
    }
}

#[cfg(test)]
#[path = "arbiter_tests.rs"]
mod tests;
