// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic demand generation for a signal client

use rand::Rng;
use std::ops::{Range, RangeInclusive};
use std::time::Duration;

/// Seconds between demands, chosen once per client
const PERIOD_SECS: RangeInclusive<u64> = 5..=12;
/// One demand in this many is VIP
const VIP_ODDS: u32 = 10;
const PROXIMITY: Range<u32> = 10..100;

/// One generated demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub is_vip: bool,
    pub proximity: u32,
}

/// Emits randomised demands at a fixed random period
pub struct DemandGenerator<R> {
    rng: R,
    period: Duration,
}

impl<R: Rng> DemandGenerator<R> {
    pub fn new(mut rng: R) -> Self {
        let period = Duration::from_secs(rng.gen_range(PERIOD_SECS));
        Self { rng, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_demand(&mut self) -> Demand {
        Demand {
            is_vip: self.rng.gen_ratio(1, VIP_ODDS),
            proximity: self.rng.gen_range(PROXIMITY),
        }
    }
}

#[cfg(test)]
#[path = "demand_tests.rs"]
mod tests;
