// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator console handles

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOperatorConsole, OperatorCall};

use crate::signal::PushError;
use async_trait::async_trait;
use wg_core::StatusSnapshot;

/// A connected operator console
///
/// Consoles receive a full [`StatusSnapshot`] after every signal change,
/// plus acknowledgements for override requests they submitted.
#[async_trait]
pub trait OperatorConsole: Send + Sync + 'static {
    /// Operator identity, when the console supplied one at registration
    fn operator_id(&self) -> Option<&str>;

    async fn on_status_snapshot(&self, snapshot: &StatusSnapshot) -> Result<(), PushError>;

    async fn acknowledge(&self, message: &str) -> Result<(), PushError>;
}
