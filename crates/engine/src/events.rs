// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event logging and auditing

use wg_adapters::AuditSink;
use wg_core::{Event, Severity};

/// Log an event at the level it asks for
pub(crate) fn log_event(event: &Event) {
    let name = event.name();
    match event.severity() {
        Severity::Debug => tracing::debug!(event = name, details = ?event),
        Severity::Info => tracing::info!(event = name, details = ?event),
        Severity::Warn => tracing::warn!(event = name, details = ?event),
    }
}

/// Logs every event and records audited ones
pub(crate) struct EventSink<A> {
    audit: A,
}

impl<A: AuditSink> EventSink<A> {
    pub(crate) fn new(audit: A) -> Self {
        Self { audit }
    }

    pub(crate) fn audit(&self) -> &A {
        &self.audit
    }

    pub(crate) async fn emit(&self, event: Event) {
        log_event(&event);

        let Some(text) = event.audit_text() else {
            return;
        };
        // Audit failures never stop the controller
        if let Err(e) = self.audit.record(&text).await {
            tracing::warn!(event = event.name(), error = %e, "audit record failed");
        }
    }

    pub(crate) async fn emit_all(&self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.emit(event).await;
        }
    }
}
