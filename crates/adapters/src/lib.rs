// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the controller's external collaborators
//!
//! Signal clients and operator consoles receive pushes; the audit sink
//! records and replays audit events. The transport behind each handle is
//! supplied by the daemon.

pub mod audit;
pub mod operator;
pub mod signal;
pub mod traced;

pub use audit::{AuditError, AuditSink, FileAuditSink, NoOpAuditSink};
pub use operator::OperatorConsole;
pub use signal::{PushError, SignalClient};
pub use traced::{TracedAuditSink, TracedOperatorConsole, TracedSignalClient};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use audit::FakeAuditSink;
#[cfg(any(test, feature = "test-support"))]
pub use operator::{FakeOperatorConsole, OperatorCall};
#[cfg(any(test, feature = "test-support"))]
pub use signal::FakeSignalClient;
