// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake signal client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PushError, SignalClient};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wg_core::SignalUpdate;

/// Fake signal client that records every update it receives
#[derive(Clone)]
pub struct FakeSignalClient {
    client_id: String,
    updates: Arc<Mutex<Vec<SignalUpdate>>>,
    unreachable: Arc<AtomicBool>,
}

impl FakeSignalClient {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            updates: Arc::new(Mutex::new(Vec::new())),
            unreachable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent push fail
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Get all recorded updates
    pub fn updates(&self) -> Vec<SignalUpdate> {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recorded updates as `A_YELLOW` style labels
    pub fn labels(&self) -> Vec<String> {
        self.updates().iter().map(|u| u.label()).collect()
    }
}

#[async_trait]
impl SignalClient for FakeSignalClient {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    async fn on_state_changed(&self, update: SignalUpdate) -> Result<(), PushError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(PushError::Unreachable(self.client_id.clone()));
        }
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(update);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
