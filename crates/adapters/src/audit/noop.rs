// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op audit sink

use super::{AuditError, AuditSink};
use async_trait::async_trait;
use chrono::Utc;
use wg_core::AuditEvent;

/// Audit sink that discards events
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAuditSink;

impl NoOpAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for NoOpAuditSink {
    async fn record(&self, text: &str) -> Result<AuditEvent, AuditError> {
        Ok(AuditEvent {
            seq: 0,
            timestamp: Utc::now(),
            text: text.to_string(),
        })
    }

    async fn read_recent(&self, _limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(Vec::new())
    }
}
