// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives for right-of-way arbitration
//!
//! This module provides:
//! - **LogicalProcess** - Per-direction Lamport clock and critical-section flag
//! - **MutexCoordinator** - Two-party request/reply exchange deciding who may proceed
//! - **Gate** - Holder bookkeeping for the arbiter's exclusive lock

pub mod gate;
pub mod lamport;
pub mod mutex;

pub use gate::{Gate, GateInput, GateState, Initiator};
pub use lamport::LogicalProcess;
pub use mutex::{AccessDecision, MutexCoordinator};
