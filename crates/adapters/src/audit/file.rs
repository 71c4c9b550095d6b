// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit sink backed by the JSON-lines audit log

use super::{AuditError, AuditSink};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use wg_core::AuditEvent;
use wg_storage::{AuditLog, AuditLogError};

impl From<AuditLogError> for AuditError {
    fn from(e: AuditLogError) -> Self {
        AuditError::Storage(e.to_string())
    }
}

/// File-backed audit sink
///
/// Writes run on the blocking pool; the log is shared between clones.
#[derive(Clone)]
pub struct FileAuditSink {
    log: Arc<Mutex<AuditLog>>,
}

impl FileAuditSink {
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        let log = AuditLog::open(path)?;
        Ok(Self {
            log: Arc::new(Mutex::new(log)),
        })
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn record(&self, text: &str) -> Result<AuditEvent, AuditError> {
        let log = Arc::clone(&self.log);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut log = log.lock().unwrap_or_else(|e| e.into_inner());
            log.append(&text)
        })
        .await
        .map_err(|e| AuditError::Task(e.to_string()))?
        .map_err(AuditError::from)
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        let log = Arc::clone(&self.log);
        tokio::task::spawn_blocking(move || {
            // Holding the lock keeps a concurrent append from being read half-written
            let log = log.lock().unwrap_or_else(|e| e.into_inner());
            log.read_recent(limit)
        })
        .await
        .map_err(|e| AuditError::Task(e.to_string()))?
        .map_err(AuditError::from)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
