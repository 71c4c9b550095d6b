// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demand requests submitted by signal clients

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signal client's request for its direction to be granted right-of-way
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRequest {
    pub client_id: String,
    pub direction: Direction,
    pub is_vip: bool,
    /// Distance of the approaching traffic, as reported by the client
    pub proximity: u32,
}

impl DemandRequest {
    pub fn new(client_id: impl Into<String>, direction: Direction) -> Self {
        Self {
            client_id: client_id.into(),
            direction,
            is_vip: false,
            proximity: 0,
        }
    }

    pub fn vip(self) -> Self {
        Self {
            is_vip: true,
            ..self
        }
    }

    pub fn with_proximity(self, proximity: u32) -> Self {
        Self { proximity, ..self }
    }
}

impl fmt::Display for DemandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vip {
            write!(f, "{} (VIP)", self.client_id)
        } else {
            write!(f, "{}", self.client_id)
        }
    }
}
