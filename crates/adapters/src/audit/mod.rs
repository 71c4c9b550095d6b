// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit sinks

mod file;
mod noop;

pub use file::FileAuditSink;
pub use noop::NoOpAuditSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAuditSink;

use async_trait::async_trait;
use thiserror::Error;
use wg_core::AuditEvent;

/// Errors from audit sink operations
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("audit storage error: {0}")]
    Storage(String),
    #[error("audit task failed: {0}")]
    Task(String),
}

/// Durable destination for audit events
#[async_trait]
pub trait AuditSink: Clone + Send + Sync + 'static {
    /// Append one event; returns the stored record
    async fn record(&self, text: &str) -> Result<AuditEvent, AuditError>;

    /// Up to `limit` most recent events, newest first
    async fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError>;
}
