// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two road-pairs contending for right-of-way

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two mutually exclusive road-pairs at the intersection.
///
/// Exactly one direction holds right-of-way at a time, so the controller
/// tracks a single `Direction` rather than a pair of booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    A,
    B,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::A, Direction::B];

    /// The conflicting direction
    pub fn other(self) -> Direction {
        match self {
            Direction::A => Direction::B,
            Direction::B => Direction::A,
        }
    }

    /// Stable node id, used as the tie-break in the mutex protocol
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::A => "A",
            Direction::B => "B",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected A or B)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Direction::A),
            "B" | "b" => Ok(Direction::B),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "direction_tests.rs"]
mod tests;
