// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-party Ricart-Agrawala style exchange between the direction processes
//!
//! The arbiter already serializes every caller, so this runs with a single
//! requester at a time. It is kept as a second, independent exclusivity check.

use super::lamport::LogicalProcess;
use crate::direction::Direction;
use crate::event::Event;

/// Outcome of one request/reply exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub granted: bool,
    pub events: Vec<Event>,
}

/// Owns both direction processes for the lifetime of the controller
#[derive(Clone, Debug)]
pub struct MutexCoordinator {
    a: LogicalProcess,
    b: LogicalProcess,
}

impl Default for MutexCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl MutexCoordinator {
    pub fn new() -> Self {
        Self {
            a: LogicalProcess::new(Direction::A),
            b: LogicalProcess::new(Direction::B),
        }
    }

    /// Build a coordinator from explicit process states
    pub fn from_processes(a: LogicalProcess, b: LogicalProcess) -> Self {
        Self { a, b }
    }

    pub fn process(&self, direction: Direction) -> &LogicalProcess {
        match direction {
            Direction::A => &self.a,
            Direction::B => &self.b,
        }
    }

    fn pair_mut(&mut self, requester: Direction) -> (&mut LogicalProcess, &mut LogicalProcess) {
        match requester {
            Direction::A => (&mut self.a, &mut self.b),
            Direction::B => (&mut self.b, &mut self.a),
        }
    }

    /// Ask the peer direction for permission to activate `requester`.
    ///
    /// On a grant the requester enters its critical section. On a deferral it
    /// withdraws, so two deferred directions can never block each other, and
    /// the caller is expected to requeue the demand.
    pub fn request_access(&mut self, requester: Direction) -> AccessDecision {
        let (mine, peer) = self.pair_mut(requester);
        let mut events = Vec::with_capacity(2);

        let stamp = mine.request_critical_section();
        events.push(Event::MutexRequested {
            requester,
            clock: stamp,
        });

        let granted = peer.receive_request(stamp, requester);
        let peer_clock = peer.clock();
        if granted {
            mine.enter_critical_section();
            events.push(Event::MutexGranted {
                requester,
                peer: requester.other(),
                peer_clock,
            });
        } else {
            mine.withdraw_request();
            events.push(Event::MutexDeferred {
                requester,
                peer: requester.other(),
                peer_clock,
            });
        }

        AccessDecision { granted, events }
    }
}

#[cfg(test)]
#[path = "mutex_tests.rs"]
mod tests;
