// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tiered request queues with threshold-based load balancing
//!
//! Three FIFO tiers feed a single consumer in strict order:
//! VIP, then normal queue 1, then normal queue 2. Non-VIP demand is steered
//! between the two normal queues by a selector with hysteresis: it moves to
//! queue 2 once queue 1 reaches capacity and moves back only when queue 1
//! has drained completely.

use crate::demand::DemandRequest;
use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Which queue a request sits in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueTier {
    Vip,
    Normal1,
    Normal2,
}

impl fmt::Display for QueueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueTier::Vip => write!(f, "vip"),
            QueueTier::Normal1 => write!(f, "queue 1"),
            QueueTier::Normal2 => write!(f, "queue 2"),
        }
    }
}

/// Queue capacities
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Capacity of normal queue 1, also the load-balancing threshold
    pub normal_capacity: usize,
    /// Optional capacity of normal queue 2 (unbounded when `None`)
    pub overflow_capacity: Option<usize>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            normal_capacity: 5,
            overflow_capacity: None,
        }
    }
}

/// Result of submitting a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Queued(QueueTier),
    Dropped,
}

/// A request pulled for dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dequeued {
    pub request: DemandRequest,
    pub tier: QueueTier,
    pub events: Vec<Event>,
}

/// Point-in-time copy of the queue contents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub vip: Vec<DemandRequest>,
    pub normal1: Vec<DemandRequest>,
    pub normal2: Vec<DemandRequest>,
    pub use_queue1: bool,
}

impl QueueSnapshot {
    pub fn len(&self) -> usize {
        self.vip.len() + self.normal1.len() + self.normal2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
pub struct RequestQueues {
    config: QueueConfig,
    vip: VecDeque<DemandRequest>,
    normal1: VecDeque<DemandRequest>,
    normal2: VecDeque<DemandRequest>,
    use_queue1: bool,
}

impl Default for RequestQueues {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl RequestQueues {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            vip: VecDeque::new(),
            normal1: VecDeque::with_capacity(config.normal_capacity),
            normal2: VecDeque::new(),
            use_queue1: true,
        }
    }

    pub fn len(&self) -> usize {
        self.vip.len() + self.normal1.len() + self.normal2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tier_len(&self, tier: QueueTier) -> usize {
        match tier {
            QueueTier::Vip => self.vip.len(),
            QueueTier::Normal1 => self.normal1.len(),
            QueueTier::Normal2 => self.normal2.len(),
        }
    }

    /// The normal queue new non-VIP demand is currently steered to
    pub fn selected(&self) -> QueueTier {
        if self.use_queue1 {
            QueueTier::Normal1
        } else {
            QueueTier::Normal2
        }
    }

    fn has_room(&self, tier: QueueTier) -> bool {
        match tier {
            QueueTier::Vip => true,
            QueueTier::Normal1 => self.normal1.len() < self.config.normal_capacity,
            QueueTier::Normal2 => self
                .config
                .overflow_capacity
                .is_none_or(|cap| self.normal2.len() < cap),
        }
    }

    fn queue_mut(&mut self, tier: QueueTier) -> &mut VecDeque<DemandRequest> {
        match tier {
            QueueTier::Vip => &mut self.vip,
            QueueTier::Normal1 => &mut self.normal1,
            QueueTier::Normal2 => &mut self.normal2,
        }
    }

    /// Flip the selector if queue 1 just filled up or has fully drained
    fn rebalance(&mut self) -> Option<Event> {
        if self.use_queue1 && self.normal1.len() >= self.config.normal_capacity {
            self.use_queue1 = false;
        } else if !self.use_queue1 && self.normal1.is_empty() {
            self.use_queue1 = true;
        } else {
            return None;
        }
        Some(Event::QueueRebalanced {
            selected: self.selected(),
        })
    }

    /// Admit a request. VIP demand is never dropped; normal demand is dropped
    /// only when both normal queues are full.
    pub fn submit(&mut self, request: DemandRequest) -> (Admission, Vec<Event>) {
        let mut events = Vec::new();

        let tier = if request.is_vip {
            Some(QueueTier::Vip)
        } else {
            events.extend(self.rebalance());
            let selected = self.selected();
            let fallback = match selected {
                QueueTier::Normal1 => QueueTier::Normal2,
                _ => QueueTier::Normal1,
            };
            [selected, fallback]
                .into_iter()
                .find(|tier| self.has_room(*tier))
        };

        let Some(tier) = tier else {
            events.push(Event::DemandDropped {
                client_id: request.client_id,
                direction: request.direction,
            });
            return (Admission::Dropped, events);
        };

        events.push(Event::DemandQueued {
            client_id: request.client_id.clone(),
            direction: request.direction,
            tier,
        });
        self.queue_mut(tier).push_back(request);
        if tier != QueueTier::Vip {
            events.extend(self.rebalance());
        }

        (Admission::Queued(tier), events)
    }

    /// Pull the next request in strict tier order (VIP, queue 1, queue 2)
    pub fn pop_next(&mut self) -> Option<Dequeued> {
        let tier = [QueueTier::Vip, QueueTier::Normal1, QueueTier::Normal2]
            .into_iter()
            .find(|tier| self.tier_len(*tier) > 0)?;
        let request = self.queue_mut(tier).pop_front()?;

        let mut events = vec![Event::DemandDispatched {
            client_id: request.client_id.clone(),
            direction: request.direction,
            tier,
        }];
        events.extend(self.rebalance());

        Some(Dequeued {
            request,
            tier,
            events,
        })
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            vip: self.vip.iter().cloned().collect(),
            normal1: self.normal1.iter().cloned().collect(),
            normal2: self.normal2.iter().cloned().collect(),
            use_queue1: self.use_queue1,
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
