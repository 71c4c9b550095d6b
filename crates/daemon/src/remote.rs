// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators reached over a registration connection.
//!
//! Each handle forwards pushes to the connection's writer task through a
//! bounded channel. A closed channel means the connection is gone.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use wg_adapters::{OperatorConsole, PushError, SignalClient};
use wg_core::{SignalUpdate, StatusSnapshot};
use wg_daemon::protocol::{Push, DEFAULT_TIMEOUT};

/// Pushes buffered per connection before senders start waiting
pub const PUSH_BUFFER: usize = 32;

async fn forward(tx: &mpsc::Sender<Push>, push: Push) -> Result<(), PushError> {
    tx.send_timeout(push, DEFAULT_TIMEOUT)
        .await
        .map_err(|e| match e {
            SendTimeoutError::Timeout(_) => PushError::Timeout,
            SendTimeoutError::Closed(_) => PushError::Unreachable("connection closed".to_string()),
        })
}

/// Signal head on the far side of a TCP connection
pub struct RemoteSignalClient {
    client_id: String,
    tx: mpsc::Sender<Push>,
}

impl RemoteSignalClient {
    pub fn new(client_id: impl Into<String>, tx: mpsc::Sender<Push>) -> Self {
        Self {
            client_id: client_id.into(),
            tx,
        }
    }
}

#[async_trait]
impl SignalClient for RemoteSignalClient {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    async fn on_state_changed(&self, update: SignalUpdate) -> Result<(), PushError> {
        forward(&self.tx, Push::StateChanged { update }).await
    }
}

/// Operator console on the far side of a TCP connection
pub struct RemoteOperatorConsole {
    operator_id: Option<String>,
    tx: mpsc::Sender<Push>,
}

impl RemoteOperatorConsole {
    pub fn new(operator_id: Option<String>, tx: mpsc::Sender<Push>) -> Self {
        Self { operator_id, tx }
    }
}

#[async_trait]
impl OperatorConsole for RemoteOperatorConsole {
    fn operator_id(&self) -> Option<&str> {
        self.operator_id.as_deref()
    }

    async fn on_status_snapshot(&self, snapshot: &StatusSnapshot) -> Result<(), PushError> {
        forward(
            &self.tx,
            Push::StatusSnapshot {
                snapshot: snapshot.clone(),
            },
        )
        .await
    }

    async fn acknowledge(&self, message: &str) -> Result<(), PushError> {
        forward(
            &self.tx,
            Push::Acknowledge {
                message: message.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
