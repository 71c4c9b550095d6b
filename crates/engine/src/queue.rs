// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared demand queue with a blocking pull for the dispatch loop

use std::sync::Mutex;
use tokio::sync::Notify;
use wg_core::{Admission, DemandRequest, Dequeued, Event, QueueConfig, QueueSnapshot, RequestQueues};

pub struct DemandQueue {
    queues: Mutex<RequestQueues>,
    ready: Notify,
}

impl DemandQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            queues: Mutex::new(RequestQueues::new(config)),
            ready: Notify::new(),
        }
    }

    pub fn submit(&self, request: DemandRequest) -> (Admission, Vec<Event>) {
        let result = self
            .queues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .submit(request);
        if matches!(result.0, Admission::Queued(_)) {
            self.ready.notify_one();
        }
        result
    }

    /// Put a deferred request back for a later dispatch cycle
    pub fn requeue(&self, request: DemandRequest) -> (Admission, Vec<Event>) {
        let requeued = Event::DemandRequeued {
            client_id: request.client_id.clone(),
            direction: request.direction,
        };
        let (admission, mut events) = self.submit(request);
        events.insert(0, requeued);
        (admission, events)
    }

    pub fn try_next(&self) -> Option<Dequeued> {
        self.queues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_next()
    }

    /// Wait until a request is available and pull it in tier order.
    ///
    /// Meant for a single consumer. Cancel safe: a request is only removed
    /// when the future completes.
    pub async fn next_for_dispatch(&self) -> Dequeued {
        loop {
            if let Some(next) = self.try_next() {
                return next;
            }
            self.ready.notified().await;
        }
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.queues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot()
    }

    pub fn len(&self) -> usize {
        self.queues.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
