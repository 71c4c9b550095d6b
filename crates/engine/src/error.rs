// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use thiserror::Error;
use wg_adapters::AuditError;

/// Errors that can occur in the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("audit error: {0}")]
    Audit(#[from] AuditError),
    #[error("dispatch task failed: {0}")]
    DispatchFailed(String),
}
