// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn other_is_an_involution() {
    for d in Direction::ALL {
        assert_ne!(d, d.other());
        assert_eq!(d, d.other().other());
    }
}

#[parameterized(
    upper_a = { "A", Direction::A },
    lower_a = { "a", Direction::A },
    upper_b = { "B", Direction::B },
    padded_b = { " b ", Direction::B },
)]
fn parses_direction(input: &str, expected: Direction) {
    assert_eq!(input.parse::<Direction>().unwrap(), expected);
}

#[test]
fn rejects_unknown_direction() {
    let err = "north".parse::<Direction>().unwrap_err();
    assert_eq!(err.to_string(), "unknown direction 'north' (expected A or B)");
}

#[test]
fn node_ids_sort_a_before_b() {
    assert!(Direction::A.as_str() < Direction::B.as_str());
    assert!(Direction::A < Direction::B);
}

#[test]
fn serializes_as_bare_letter() {
    assert_eq!(serde_json::to_string(&Direction::B).unwrap(), "\"B\"");
}
