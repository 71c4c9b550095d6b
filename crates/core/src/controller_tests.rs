// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::signal::PedestrianPhase;
use proptest::prelude::*;

fn begin(target: Direction) -> ControllerInput {
    ControllerInput::Begin {
        target,
        initiator: Initiator::Dispatcher,
    }
}

fn broadcasts(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Broadcast(update) => Some(update.label()),
            _ => None,
        })
        .collect()
}

#[test]
fn initial_state_has_one_green_direction() {
    let state = ControllerState::new(Direction::A);
    assert_eq!(state.active_direction(), Direction::A);
    assert!(!state.in_transition());
    assert_eq!(state.status(Direction::A).road, RoadPhase::Green);
    assert_eq!(state.status(Direction::B).road, RoadPhase::Red);
    assert_eq!(state.snapshot().green_directions(), vec![Direction::A]);
}

#[test]
fn begin_clears_active_direction_and_stops_the_other() {
    let state = ControllerState::new(Direction::A);
    let (state, effects) = state.transition(begin(Direction::B));

    assert!(state.in_transition());
    assert_eq!(state.active_direction(), Direction::A);
    assert_eq!(broadcasts(&effects), ["A_YELLOW", "B_ALL_STOP"]);
    assert!(matches!(
        &effects[0],
        Effect::Emit(Event::TransitionStarted { from: Direction::A, to: Direction::B, .. })
    ));
    assert_eq!(
        state.status(Direction::A).pedestrian,
        PedestrianPhase::BlinkingWarning
    );
    assert_eq!(state.status(Direction::B).pedestrian, PedestrianPhase::Green);
    assert!(state.snapshot().green_directions().is_empty());
}

#[test]
fn commit_grants_new_direction() {
    let state = ControllerState::new(Direction::A);
    let (state, _) = state.transition(begin(Direction::B));
    let (state, effects) = state.transition(ControllerInput::Commit);

    assert_eq!(state.active_direction(), Direction::B);
    assert!(state.in_transition());
    assert_eq!(broadcasts(&effects), ["B_GREEN", "A_RED"]);
    assert_eq!(state.status(Direction::B).pedestrian, PedestrianPhase::Red);
    assert_eq!(state.status(Direction::A).pedestrian, PedestrianPhase::Green);
}

#[test]
fn finish_allows_next_transition() {
    let state = ControllerState::new(Direction::A);
    let (state, _) = state.transition(begin(Direction::B));
    let (state, _) = state.transition(ControllerInput::Commit);
    assert_eq!(state.check(Direction::A), Err(TransitionRefusal::InTransition));

    let (state, effects) = state.transition(ControllerInput::Finish);
    assert!(!state.in_transition());
    assert!(matches!(
        effects.first(),
        Some(Effect::Emit(Event::TransitionCompleted { active: Direction::B }))
    ));
    assert_eq!(state.check(Direction::A), Ok(()));
}

#[test]
fn second_begin_while_in_flight_is_noop() {
    let state = ControllerState::new(Direction::A);
    let (state, _) = state.transition(begin(Direction::B));

    for target in Direction::ALL {
        let (after, effects) = state.transition(begin(target));
        assert_eq!(after, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn begin_to_active_direction_is_refused() {
    let state = ControllerState::new(Direction::A);
    assert_eq!(
        state.check(Direction::A),
        Err(TransitionRefusal::AlreadyActive(Direction::A))
    );
    let (after, effects) = state.transition(begin(Direction::A));
    assert_eq!(after, state);
    assert!(effects.is_empty());
}

#[test]
fn out_of_order_inputs_are_ignored() {
    let state = ControllerState::new(Direction::A);
    let (after, effects) = state.transition(ControllerInput::Commit);
    assert_eq!(after, state);
    assert!(effects.is_empty());

    let (after, effects) = state.transition(ControllerInput::Finish);
    assert_eq!(after, state);
    assert!(effects.is_empty());
}

#[test]
fn refusal_messages() {
    assert_eq!(
        TransitionRefusal::AlreadyActive(Direction::B).to_string(),
        "direction B is already active"
    );
    assert_eq!(
        TransitionRefusal::InTransition.to_string(),
        "a transition is already in progress"
    );
}

fn arb_input() -> impl Strategy<Value = ControllerInput> {
    prop_oneof![
        Just(begin(Direction::A)),
        Just(begin(Direction::B)),
        Just(ControllerInput::Commit),
        Just(ControllerInput::Finish),
    ]
}

proptest! {
    #[test]
    fn never_two_greens(inputs in proptest::collection::vec(arb_input(), 0..50)) {
        let mut state = ControllerState::new(Direction::A);
        for input in inputs {
            state = state.transition(input).0;
            prop_assert!(state.snapshot().green_directions().len() <= 1);
            for d in Direction::ALL {
                let status = state.status(d);
                prop_assert_eq!(status.pedestrian, PedestrianPhase::coupled_to(status.road));
            }
        }
    }

    #[test]
    fn committed_green_matches_active(inputs in proptest::collection::vec(arb_input(), 0..50)) {
        let mut state = ControllerState::new(Direction::B);
        for input in inputs {
            state = state.transition(input).0;
            if !matches!(state.stage(), Stage::Clearing { .. }) {
                let active = state.active_direction();
                prop_assert_eq!(state.status(active).road, RoadPhase::Green);
                prop_assert_eq!(state.status(active).pedestrian, PedestrianPhase::Red);
                prop_assert_eq!(state.status(active.other()).pedestrian, PedestrianPhase::Green);
            }
        }
    }
}
