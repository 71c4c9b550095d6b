// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared coordination context

use crate::arbiter::AccessArbiter;
use crate::events::EventSink;
use crate::queue::DemandQueue;
use crate::registry::ClientRegistry;
use std::sync::atomic::AtomicBool;
use std::sync::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wg_adapters::AuditSink;
use wg_core::ControllerConfig;

/// Everything the dispatch loop, overrides and RPC operations share.
///
/// Owned by the [`Controller`](crate::Controller) and handed to spawned
/// tasks behind an `Arc`.
pub(crate) struct Context<A> {
    pub(crate) config: ControllerConfig,
    pub(crate) registry: ClientRegistry,
    pub(crate) queue: DemandQueue,
    pub(crate) arbiter: AccessArbiter,
    pub(crate) events: EventSink<A>,
    pub(crate) shutdown: watch::Sender<bool>,
    pub(crate) dispatch_started: AtomicBool,
    pub(crate) dispatch_task: Mutex<Option<JoinHandle<()>>>,
}

impl<A: AuditSink> Context<A> {
    pub(crate) fn new(config: ControllerConfig, audit: A) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            registry: ClientRegistry::new(),
            queue: DemandQueue::new(config.queue_config()),
            arbiter: AccessArbiter::new(config.initial_direction),
            events: EventSink::new(audit),
            shutdown,
            dispatch_started: AtomicBool::new(false),
            dispatch_task: Mutex::new(None),
            config,
        }
    }

    pub(crate) fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}
