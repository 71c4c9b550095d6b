// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wg-core: Core library for the wayguard intersection controller
//!
//! This crate provides:
//! - Direction, signal phase and demand request types
//! - Pure state machines for the controller phase sequence and the arbiter gate
//! - The two-party Lamport mutual-exclusion protocol
//! - Tiered, load-balanced request queues
//! - Observable events and controller configuration

pub mod audit;
pub mod config;
pub mod coordination;
pub mod demand;
pub mod direction;
pub mod id;
pub mod signal;

// State machines (order matters for dependencies)
pub mod event;
pub mod controller;
pub mod queue;

// Re-exports
pub use audit::AuditEvent;
pub use config::{ConfigError, ControllerConfig};
pub use controller::{ControllerInput, ControllerState, Effect, Stage, TransitionRefusal};
pub use coordination::{
    AccessDecision, Gate, GateInput, GateState, Initiator, LogicalProcess, MutexCoordinator,
};
pub use demand::DemandRequest;
pub use direction::{Direction, ParseDirectionError};
pub use event::{Event, Severity};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use queue::{Admission, Dequeued, QueueConfig, QueueSnapshot, QueueTier, RequestQueues};
pub use signal::{DirectionStatus, PedestrianPhase, RoadPhase, SignalUpdate, StatusSnapshot};
