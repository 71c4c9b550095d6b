// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lamport logical clock process, one per direction

use crate::direction::Direction;

/// A direction's participant in the mutual-exclusion protocol.
///
/// The clock never decreases: it advances by one on every local request and
/// jumps to `max(local, received) + 1` on every received request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalProcess {
    direction: Direction,
    clock: u64,
    requesting_cs: bool,
}

impl LogicalProcess {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            clock: 0,
            requesting_cs: false,
        }
    }

    /// Restore a process at a known clock (used by tests and diagnostics)
    pub fn with_state(direction: Direction, clock: u64, requesting_cs: bool) -> Self {
        Self {
            direction,
            clock,
            requesting_cs,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn is_requesting(&self) -> bool {
        self.requesting_cs
    }

    /// Local event: announce a critical-section request, returning its timestamp
    pub fn request_critical_section(&mut self) -> u64 {
        self.clock += 1;
        self.requesting_cs = true;
        self.clock
    }

    /// Leave the requesting state once permission has been received
    pub fn enter_critical_section(&mut self) {
        self.requesting_cs = false;
    }

    /// Drop out of the protocol after a deferral; the demand is retried later
    pub fn withdraw_request(&mut self) {
        self.requesting_cs = false;
    }

    /// Whether a request stamped `(their_clock, from)` wins against this process.
    ///
    /// Lower `(clock, node id)` has priority. The comparison uses this
    /// process's clock as it stood before the request arrived.
    pub fn would_grant(&self, their_clock: u64, from: Direction) -> bool {
        !self.requesting_cs
            || self.clock > their_clock
            || (self.clock == their_clock && from.as_str() < self.direction.as_str())
    }

    /// Handle a peer's request: decide, then advance the clock past the
    /// received timestamp whatever the outcome.
    pub fn receive_request(&mut self, their_clock: u64, from: Direction) -> bool {
        let granted = self.would_grant(their_clock, from);
        self.clock = self.clock.max(their_clock) + 1;
        granted
    }
}

#[cfg(test)]
#[path = "lamport_tests.rs"]
mod tests;
