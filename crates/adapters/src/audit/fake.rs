// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory audit sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AuditError, AuditSink};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wg_core::AuditEvent;

/// In-memory audit sink for testing
#[derive(Clone, Default)]
pub struct FakeAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    failing: Arc<AtomicBool>,
}

impl FakeAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Recorded texts, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }
}

#[async_trait]
impl AuditSink for FakeAuditSink {
    async fn record(&self, text: &str) -> Result<AuditEvent, AuditError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuditError::Storage("injected failure".into()));
        }
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let entry = AuditEvent {
            seq: events.len() as u64 + 1,
            timestamp: Utc::now(),
            text: text.to_string(),
        };
        events.push(entry.clone());
        Ok(entry)
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}
