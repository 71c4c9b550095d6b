// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::audit::{AuditError, AuditSink};
use crate::operator::OperatorConsole;
use crate::signal::{PushError, SignalClient};
use async_trait::async_trait;
use tracing::Instrument;
use wg_core::{AuditEvent, SignalUpdate, StatusSnapshot};

/// Wrapper that adds tracing to any SignalClient
#[derive(Clone)]
pub struct TracedSignalClient<S> {
    inner: S,
}

impl<S> TracedSignalClient<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SignalClient> SignalClient for TracedSignalClient<S> {
    fn client_id(&self) -> &str {
        self.inner.client_id()
    }

    async fn on_state_changed(&self, update: SignalUpdate) -> Result<(), PushError> {
        let span = tracing::info_span!(
            "signal.push",
            client_id = self.inner.client_id(),
            update = %update.label(),
        );

        async {
            let start = std::time::Instant::now();
            let result = self.inner.on_state_changed(update).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "delivered"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "push failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any OperatorConsole
#[derive(Clone)]
pub struct TracedOperatorConsole<O> {
    inner: O,
}

impl<O> TracedOperatorConsole<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<O: OperatorConsole> OperatorConsole for TracedOperatorConsole<O> {
    fn operator_id(&self) -> Option<&str> {
        self.inner.operator_id()
    }

    async fn on_status_snapshot(&self, snapshot: &StatusSnapshot) -> Result<(), PushError> {
        let span = tracing::info_span!("operator.snapshot", operator_id = ?self.inner.operator_id());

        async {
            let result = self.inner.on_status_snapshot(snapshot).await;
            match &result {
                Ok(()) => tracing::debug!(in_transition = snapshot.in_transition, "delivered"),
                Err(e) => tracing::warn!(error = %e, "snapshot push failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn acknowledge(&self, message: &str) -> Result<(), PushError> {
        let span = tracing::info_span!("operator.ack", operator_id = ?self.inner.operator_id());

        async {
            let result = self.inner.acknowledge(message).await;
            match &result {
                Ok(()) => tracing::info!(ack = message, "acknowledged"),
                Err(e) => tracing::warn!(error = %e, "acknowledge failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any AuditSink
#[derive(Clone)]
pub struct TracedAuditSink<A> {
    inner: A,
}

impl<A> TracedAuditSink<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: AuditSink> AuditSink for TracedAuditSink<A> {
    async fn record(&self, text: &str) -> Result<AuditEvent, AuditError> {
        let span = tracing::info_span!("audit.record");

        async {
            let start = std::time::Instant::now();
            let result = self.inner.record(text).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(entry) => tracing::debug!(seq = entry.seq, elapsed_ms, "recorded"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, text, "audit write failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        let result = self.inner.read_recent(limit).await;
        tracing::trace!(limit, count = ?result.as_ref().map(Vec::len).ok(), "read recent");
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
