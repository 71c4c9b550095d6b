// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only audit log stored as JSON lines

use chrono::Utc;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wg_core::AuditEvent;

/// Errors that can occur in audit log operations
#[derive(Debug, Error)]
pub enum AuditLogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only log of audit events.
///
/// Entries are never rewritten or reordered; each carries a sequence number
/// that continues across reopenings.
pub struct AuditLog {
    path: PathBuf,
    file: File,
    sequence: u64,
}

impl AuditLog {
    /// Open or create an audit log at the given path
    pub fn open(path: &Path) -> Result<Self, AuditLogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        // Count existing entries to set sequence number
        let reader = BufReader::new(File::open(path)?);
        let sequence = reader
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.is_empty())
            .count() as u64;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sequence,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Append an event, stamped with the current UTC time
    pub fn append(&mut self, text: &str) -> Result<AuditEvent, AuditLogError> {
        let entry = AuditEvent {
            seq: self.sequence + 1,
            timestamp: Utc::now(),
            text: text.to_string(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_data()?;
        self.sequence = entry.seq;
        Ok(entry)
    }

    /// Up to `limit` most recent entries, newest first
    pub fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditLogError> {
        Self::read_recent_from(&self.path, limit)
    }

    /// Read recent entries from a log file without opening it for writing
    pub fn read_recent_from(path: &Path, limit: usize) -> Result<Vec<AuditEvent>, AuditLogError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut window = VecDeque::with_capacity(limit.min(1024));
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let entry: AuditEvent = serde_json::from_str(&line)?;
            if window.len() == limit {
                window.pop_front();
            }
            window.push_back(entry);
        }

        Ok(window.into_iter().rev().collect())
    }
}

#[cfg(test)]
#[path = "audit_log_tests.rs"]
mod tests;
