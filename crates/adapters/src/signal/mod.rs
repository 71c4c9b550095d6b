// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal client handles

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSignalClient;

use async_trait::async_trait;
use thiserror::Error;
use wg_core::SignalUpdate;

/// Errors from pushing to a remote collaborator
#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("collaborator unreachable: {0}")]
    Unreachable(String),
    #[error("push timed out")]
    Timeout,
}

/// A connected signal head for one direction
#[async_trait]
pub trait SignalClient: Send + Sync + 'static {
    /// Id the client registered under, e.g. `Pair_A`
    fn client_id(&self) -> &str;

    /// Show a new phase on this client's signal head
    async fn on_state_changed(&self, update: SignalUpdate) -> Result<(), PushError>;
}
