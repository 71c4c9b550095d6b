// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direction state machine
//!
//! A switch runs in three steps driven by the engine, with timed holds in
//! between: `Begin` (active direction to yellow, the other to blinking
//! all-stop), `Commit` (new direction green, the other red) and `Finish`
//! (minimum green elapsed, next transition allowed).

use crate::coordination::Initiator;
use crate::direction::Direction;
use crate::event::Event;
use crate::signal::{DirectionStatus, RoadPhase, SignalUpdate, StatusSnapshot};
use std::collections::BTreeMap;
use thiserror::Error;

/// Side effects the state machine asks the engine to perform, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Emit an event for logging and auditing
    Emit(Event),
    /// Push a phase change to the signal clients of one direction
    Broadcast(SignalUpdate),
    /// Push the current status to every operator console
    PublishStatus,
}

/// Where the controller is in the phase sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// One direction green, no transition running
    Stable,
    /// Active direction clearing on yellow while the other shows all-stop
    Clearing {
        from: Direction,
        to: Direction,
        initiator: Initiator,
    },
    /// New direction committed, holding for the minimum green interval
    MinimumGreen,
}

/// Inputs that drive the phase sequence
#[derive(Clone, Debug)]
pub enum ControllerInput {
    Begin {
        target: Direction,
        initiator: Initiator,
    },
    Commit,
    Finish,
}

/// Why a transition cannot start
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionRefusal {
    #[error("a transition is already in progress")]
    InTransition,
    #[error("direction {0} is already active")]
    AlreadyActive(Direction),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerState {
    active: Direction,
    stage: Stage,
    signals: BTreeMap<Direction, DirectionStatus>,
}

impl ControllerState {
    /// Start with `initial` green and the other direction red
    pub fn new(initial: Direction) -> Self {
        let mut state = Self {
            active: initial,
            stage: Stage::Stable,
            signals: BTreeMap::new(),
        };
        state.set_road(initial, RoadPhase::Green);
        state.set_road(initial.other(), RoadPhase::Red);
        state
    }

    pub fn active_direction(&self) -> Direction {
        self.active
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn in_transition(&self) -> bool {
        !matches!(self.stage, Stage::Stable)
    }

    pub fn status(&self, direction: Direction) -> DirectionStatus {
        self.signals
            .get(&direction)
            .copied()
            .unwrap_or_else(|| DirectionStatus::for_road(RoadPhase::Red))
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            active: self.active,
            in_transition: self.in_transition(),
            directions: self.signals.clone(),
        }
    }

    /// Check whether a switch to `target` may start now
    pub fn check(&self, target: Direction) -> Result<(), TransitionRefusal> {
        if self.in_transition() {
            return Err(TransitionRefusal::InTransition);
        }
        if target == self.active {
            return Err(TransitionRefusal::AlreadyActive(target));
        }
        Ok(())
    }

    fn set_road(&mut self, direction: Direction, road: RoadPhase) -> Effect {
        self.signals
            .insert(direction, DirectionStatus::for_road(road));
        Effect::Broadcast(SignalUpdate::new(direction, road))
    }

    /// Pure state transition function.
    ///
    /// Inputs that do not apply to the current stage are no-ops, so a second
    /// `Begin` while a switch is in flight leaves the state untouched.
    pub fn transition(&self, input: ControllerInput) -> (ControllerState, Vec<Effect>) {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match (input, &self.stage) {
            (ControllerInput::Begin { target, initiator }, Stage::Stable)
                if target != self.active =>
            {
                let from = self.active;
                effects.push(Effect::Emit(Event::TransitionStarted {
                    from,
                    to: target,
                    initiator: initiator.clone(),
                }));
                next.stage = Stage::Clearing {
                    from,
                    to: target,
                    initiator,
                };
                effects.push(next.set_road(from, RoadPhase::Yellow));
                effects.push(next.set_road(from.other(), RoadPhase::AllStop));
                effects.push(Effect::PublishStatus);
            }

            (ControllerInput::Commit, Stage::Clearing { to, .. }) => {
                let to = *to;
                next.active = to;
                next.stage = Stage::MinimumGreen;
                effects.push(next.set_road(to, RoadPhase::Green));
                effects.push(next.set_road(to.other(), RoadPhase::Red));
                effects.push(Effect::Emit(Event::TransitionCommitted { active: to }));
                effects.push(Effect::PublishStatus);
            }

            (ControllerInput::Finish, Stage::MinimumGreen) => {
                next.stage = Stage::Stable;
                effects.push(Effect::Emit(Event::TransitionCompleted {
                    active: self.active,
                }));
                effects.push(Effect::PublishStatus);
            }

            _ => {
                // Not applicable in this stage, no-op
            }
        }

        (next, effects)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
