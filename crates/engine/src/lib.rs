// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Wayguard coordination engine
//!
//! Runs the controller: signal-client and operator registration, the
//! automated dispatch loop, manual overrides and the transition executor,
//! all serialized through a single access arbiter.

mod arbiter;
mod broadcast;
mod context;
mod controller;
mod dispatch;
mod error;
mod events;
mod executor;
mod queue;
mod registry;

pub use arbiter::{AccessArbiter, ArbiterGuard, ArbiterState};
pub use controller::{Controller, ControllerStatus, OverrideOutcome, OverrideRejection};
pub use error::EngineError;
pub use queue::DemandQueue;
pub use registry::{ClientRegistry, SignalRegistration};
