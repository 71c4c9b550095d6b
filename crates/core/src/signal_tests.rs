// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    green = { RoadPhase::Green, PedestrianPhase::Red },
    yellow = { RoadPhase::Yellow, PedestrianPhase::BlinkingWarning },
    red = { RoadPhase::Red, PedestrianPhase::Green },
    all_stop = { RoadPhase::AllStop, PedestrianPhase::Green },
)]
fn pedestrian_phase_mirrors_road(road: RoadPhase, expected: PedestrianPhase) {
    assert_eq!(PedestrianPhase::coupled_to(road), expected);
    assert_eq!(DirectionStatus::for_road(road).pedestrian, expected);
}

#[test]
fn update_labels_combine_direction_and_phase() {
    assert_eq!(SignalUpdate::new(Direction::A, RoadPhase::Yellow).label(), "A_YELLOW");
    assert_eq!(SignalUpdate::new(Direction::B, RoadPhase::AllStop).label(), "B_ALL_STOP");
    assert_eq!(SignalUpdate::new(Direction::B, RoadPhase::Green).to_string(), "B_GREEN");
}

#[test]
fn only_all_stop_blinks() {
    assert!(RoadPhase::AllStop.is_blinking());
    assert!(!RoadPhase::Red.is_blinking());
}

#[test]
fn snapshot_serializes_with_direction_keys() {
    let snapshot = StatusSnapshot {
        active: Direction::A,
        in_transition: false,
        directions: BTreeMap::from([
            (Direction::A, DirectionStatus::for_road(RoadPhase::Green)),
            (Direction::B, DirectionStatus::for_road(RoadPhase::Red)),
        ]),
    };

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["directions"]["A"]["road"], "green");
    assert_eq!(json["directions"]["B"]["pedestrian"], "green");

    let back: StatusSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back.green_directions(), vec![Direction::A]);
}
