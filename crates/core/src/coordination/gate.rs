// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate state machine recording who holds the arbiter lock
//!
//! Exclusion itself is enforced by the engine's async mutex. The gate mirrors
//! the holder so that rejections can name it and status can report it.

use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Party that may hold the arbiter lock and start a transition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiator {
    /// The automated dispatch loop
    Dispatcher,
    /// A manual override from an operator console
    Operator(String),
}

impl Initiator {
    pub fn operator(id: impl Into<String>) -> Self {
        Initiator::Operator(id.into())
    }
}

impl fmt::Display for Initiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initiator::Dispatcher => write!(f, "automated dispatcher"),
            Initiator::Operator(id) => write!(f, "operator {}", id),
        }
    }
}

/// Gate state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Nobody is deciding or executing a transition
    Free,
    /// A transition decision or execution is in progress
    Held { holder: Initiator },
}

/// Events that can trigger gate transitions
#[derive(Clone, Debug)]
pub enum GateInput {
    Acquire { holder: Initiator },
    Release { holder: Initiator },
}

#[derive(Clone, Debug)]
pub struct Gate {
    pub state: GateState,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    pub fn new() -> Self {
        Self {
            state: GateState::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, GateState::Free)
    }

    pub fn is_held_by(&self, holder: &Initiator) -> bool {
        matches!(&self.state, GateState::Held { holder: h } if h == holder)
    }

    pub fn holder(&self) -> Option<&Initiator> {
        match &self.state {
            GateState::Free => None,
            GateState::Held { holder } => Some(holder),
        }
    }

    /// Pure state transition function
    pub fn transition(&self, input: GateInput) -> (Gate, Vec<Event>) {
        let mut new_gate = self.clone();
        let mut events = Vec::new();

        match input {
            GateInput::Acquire { holder } => match &self.state {
                GateState::Free => {
                    new_gate.state = GateState::Held {
                        holder: holder.clone(),
                    };
                    events.push(Event::GateAcquired { holder });
                }
                GateState::Held { holder: current } => {
                    events.push(Event::GateDenied {
                        holder,
                        current: current.clone(),
                    });
                }
            },

            GateInput::Release { holder } => match &self.state {
                GateState::Held { holder: current } if current == &holder => {
                    new_gate.state = GateState::Free;
                    events.push(Event::GateReleased { holder });
                }
                _ => {
                    // Wrong holder or already free, no-op
                }
            },
        }

        (new_gate, events)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
