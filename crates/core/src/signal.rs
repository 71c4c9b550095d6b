// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Road and pedestrian signal phases
//!
//! Signal states cross the collaborator boundary as a tagged
//! `{direction, phase}` value. The combined `A_YELLOW` style label exists only
//! for display and audit text.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Vehicle signal phase for one direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadPhase {
    Green,
    Yellow,
    Red,
    /// Blinking stop shown to the waiting direction while the active one clears
    AllStop,
}

impl RoadPhase {
    pub fn label(self) -> &'static str {
        match self {
            RoadPhase::Green => "GREEN",
            RoadPhase::Yellow => "YELLOW",
            RoadPhase::Red => "RED",
            RoadPhase::AllStop => "ALL_STOP",
        }
    }

    /// Short description pushed alongside the phase
    pub fn detail(self) -> &'static str {
        match self {
            RoadPhase::Green => "Active",
            RoadPhase::Yellow | RoadPhase::AllStop => "Transitioning",
            RoadPhase::Red => "Stopped",
        }
    }

    pub fn is_blinking(self) -> bool {
        matches!(self, RoadPhase::AllStop)
    }
}

impl fmt::Display for RoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pedestrian signal phase for one direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedestrianPhase {
    Red,
    BlinkingWarning,
    Green,
}

impl PedestrianPhase {
    /// Pedestrians mirror the opposite of their own direction's vehicle signal.
    pub fn coupled_to(road: RoadPhase) -> Self {
        match road {
            RoadPhase::Green => PedestrianPhase::Red,
            RoadPhase::Yellow => PedestrianPhase::BlinkingWarning,
            RoadPhase::Red | RoadPhase::AllStop => PedestrianPhase::Green,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PedestrianPhase::Red => "RED",
            PedestrianPhase::BlinkingWarning => "BLINKING",
            PedestrianPhase::Green => "GREEN",
        }
    }
}

impl fmt::Display for PedestrianPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A phase change for one direction, pushed to that direction's signal clients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalUpdate {
    pub direction: Direction,
    pub phase: RoadPhase,
}

impl SignalUpdate {
    pub fn new(direction: Direction, phase: RoadPhase) -> Self {
        Self { direction, phase }
    }

    /// Combined label such as `A_YELLOW` or `B_ALL_STOP`
    pub fn label(&self) -> String {
        format!("{}_{}", self.direction, self.phase.label())
    }

    pub fn detail(&self) -> &'static str {
        self.phase.detail()
    }
}

impl fmt::Display for SignalUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Road and pedestrian phase of one direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionStatus {
    pub road: RoadPhase,
    pub pedestrian: PedestrianPhase,
}

impl DirectionStatus {
    /// Status for a road phase with its coupled pedestrian phase
    pub fn for_road(road: RoadPhase) -> Self {
        Self {
            road,
            pedestrian: PedestrianPhase::coupled_to(road),
        }
    }
}

/// Everything an operator console needs to render the intersection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub active: Direction,
    pub in_transition: bool,
    pub directions: BTreeMap<Direction, DirectionStatus>,
}

impl StatusSnapshot {
    pub fn status(&self, direction: Direction) -> Option<&DirectionStatus> {
        self.directions.get(&direction)
    }

    /// Directions currently showing a green road phase
    pub fn green_directions(&self) -> Vec<Direction> {
        self.directions
            .iter()
            .filter(|(_, s)| s.road == RoadPhase::Green)
            .map(|(d, _)| *d)
            .collect()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
