// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake operator console for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::OperatorConsole;
use crate::signal::PushError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wg_core::StatusSnapshot;

/// Recorded operator console call
#[derive(Debug, Clone)]
pub enum OperatorCall {
    Snapshot(StatusSnapshot),
    Acknowledge(String),
}

/// Fake operator console for testing
#[derive(Clone, Default)]
pub struct FakeOperatorConsole {
    operator_id: Option<String>,
    calls: Arc<Mutex<Vec<OperatorCall>>>,
    unreachable: Arc<AtomicBool>,
}

impl FakeOperatorConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operator_id(operator_id: impl Into<String>) -> Self {
        Self {
            operator_id: Some(operator_id.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent push fail
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<OperatorCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Snapshots received, oldest first
    pub fn snapshots(&self) -> Vec<StatusSnapshot> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                OperatorCall::Snapshot(s) => Some(s),
                OperatorCall::Acknowledge(_) => None,
            })
            .collect()
    }

    /// Acknowledgement messages received, oldest first
    pub fn acknowledgements(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                OperatorCall::Acknowledge(m) => Some(m),
                OperatorCall::Snapshot(_) => None,
            })
            .collect()
    }

    fn record(&self, call: OperatorCall) -> Result<(), PushError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(PushError::Unreachable(
                self.operator_id.clone().unwrap_or_else(|| "console".into()),
            ));
        }
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl OperatorConsole for FakeOperatorConsole {
    fn operator_id(&self) -> Option<&str> {
        self.operator_id.as_deref()
    }

    async fn on_status_snapshot(&self, snapshot: &StatusSnapshot) -> Result<(), PushError> {
        self.record(OperatorCall::Snapshot(snapshot.clone()))
    }

    async fn acknowledge(&self, message: &str) -> Result<(), PushError> {
        self.record(OperatorCall::Acknowledge(message.to_string()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
