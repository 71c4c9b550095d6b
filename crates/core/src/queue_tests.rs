// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::direction::Direction;
use proptest::prelude::*;

fn normal(id: &str) -> DemandRequest {
    DemandRequest::new(id, Direction::B)
}

fn vip(id: &str) -> DemandRequest {
    DemandRequest::new(id, Direction::A).vip()
}

fn drain(queues: &mut RequestQueues) -> Vec<(String, QueueTier)> {
    std::iter::from_fn(|| queues.pop_next())
        .map(|d| (d.request.client_id, d.tier))
        .collect()
}

#[test]
fn queues_start_empty_with_queue1_selected() {
    let mut queues = RequestQueues::default();
    assert!(queues.is_empty());
    assert_eq!(queues.selected(), QueueTier::Normal1);
    assert!(queues.pop_next().is_none());
}

#[test]
fn vip_is_dispatched_before_normal_regardless_of_order() {
    let mut queues = RequestQueues::default();
    queues.submit(normal("n1"));
    queues.submit(vip("v1"));

    let first = queues.pop_next().unwrap();
    assert_eq!(first.request.client_id, "v1");
    assert_eq!(first.tier, QueueTier::Vip);
    assert_eq!(queues.pop_next().unwrap().request.client_id, "n1");
}

#[test]
fn fifo_within_vip_tier() {
    let mut queues = RequestQueues::default();
    for id in ["v1", "v2", "v3"] {
        queues.submit(vip(id));
    }
    let order: Vec<_> = drain(&mut queues).into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, ["v1", "v2", "v3"]);
}

#[test]
fn vip_queue_is_unbounded() {
    let mut queues = RequestQueues::new(QueueConfig {
        normal_capacity: 1,
        overflow_capacity: Some(1),
    });
    for i in 0..100 {
        let (admission, _) = queues.submit(vip(&format!("v{}", i)));
        assert_eq!(admission, Admission::Queued(QueueTier::Vip));
    }
    assert_eq!(queues.tier_len(QueueTier::Vip), 100);
}

#[test]
fn filling_queue1_flips_selector_to_queue2() {
    let mut queues = RequestQueues::default();
    for i in 0..4 {
        queues.submit(normal(&format!("n{}", i)));
        assert_eq!(queues.selected(), QueueTier::Normal1);
    }

    let (admission, events) = queues.submit(normal("n4"));
    assert_eq!(admission, Admission::Queued(QueueTier::Normal1));
    assert_eq!(queues.tier_len(QueueTier::Normal1), 5);
    assert_eq!(queues.selected(), QueueTier::Normal2);
    assert!(events.contains(&Event::QueueRebalanced {
        selected: QueueTier::Normal2
    }));
}

#[test]
fn selector_stays_on_queue2_until_queue1_is_empty() {
    let mut queues = RequestQueues::default();
    for i in 0..5 {
        queues.submit(normal(&format!("n{}", i)));
    }
    let (admission, _) = queues.submit(normal("overflow-1"));
    assert_eq!(admission, Admission::Queued(QueueTier::Normal2));

    // Partially draining queue 1 is not enough to switch back
    queues.pop_next();
    let (admission, _) = queues.submit(normal("overflow-2"));
    assert_eq!(admission, Admission::Queued(QueueTier::Normal2));
    assert_eq!(queues.selected(), QueueTier::Normal2);

    // Drain the rest of queue 1
    for _ in 0..3 {
        queues.pop_next();
    }
    let last = queues.pop_next().unwrap();
    assert_eq!(last.tier, QueueTier::Normal1);
    assert!(last.events.contains(&Event::QueueRebalanced {
        selected: QueueTier::Normal1
    }));
    assert_eq!(queues.selected(), QueueTier::Normal1);

    let (admission, _) = queues.submit(normal("after"));
    assert_eq!(admission, Admission::Queued(QueueTier::Normal1));
}

#[test]
fn normal_tiers_dispatch_queue1_before_queue2() {
    let mut queues = RequestQueues::new(QueueConfig {
        normal_capacity: 2,
        overflow_capacity: None,
    });
    for id in ["a", "b", "c", "d"] {
        queues.submit(normal(id));
    }
    assert_eq!(
        drain(&mut queues),
        vec![
            ("a".to_string(), QueueTier::Normal1),
            ("b".to_string(), QueueTier::Normal1),
            ("c".to_string(), QueueTier::Normal2),
            ("d".to_string(), QueueTier::Normal2),
        ]
    );
}

#[test]
fn drops_and_reports_when_both_normal_queues_are_full() {
    let mut queues = RequestQueues::new(QueueConfig {
        normal_capacity: 1,
        overflow_capacity: Some(1),
    });
    queues.submit(normal("q1"));
    queues.submit(normal("q2"));

    let (admission, events) = queues.submit(normal("lost"));
    assert_eq!(admission, Admission::Dropped);
    assert!(events.iter().any(|e| matches!(
        e,
        Event::DemandDropped { client_id, .. } if client_id == "lost"
    )));
    assert_eq!(queues.len(), 2);
}

#[test]
fn falls_back_to_queue1_when_bounded_queue2_is_full() {
    let mut queues = RequestQueues::new(QueueConfig {
        normal_capacity: 2,
        overflow_capacity: Some(1),
    });
    queues.submit(normal("a"));
    queues.submit(normal("b")); // queue 1 full, selector -> queue 2
    queues.submit(normal("c")); // queue 2 full
    queues.pop_next(); // queue 1 has room again but is not empty

    let (admission, _) = queues.submit(normal("d"));
    assert_eq!(admission, Admission::Queued(QueueTier::Normal1));
}

#[test]
fn snapshot_reflects_contents() {
    let mut queues = RequestQueues::default();
    queues.submit(vip("v"));
    queues.submit(normal("n"));

    let snapshot = queues.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.vip[0].client_id, "v");
    assert_eq!(snapshot.normal1[0].client_id, "n");
    assert!(snapshot.use_queue1);
}

proptest! {
    #[test]
    fn dispatch_order_respects_tier_precedence(flags in proptest::collection::vec(any::<bool>(), 1..40)) {
        let mut queues = RequestQueues::default();
        for (i, is_vip) in flags.iter().enumerate() {
            let id = format!("r{}", i);
            let req = if *is_vip { vip(&id) } else { normal(&id) };
            queues.submit(req);
        }

        let tiers: Vec<_> = drain(&mut queues).into_iter().map(|(_, t)| t).collect();
        prop_assert_eq!(tiers.len(), flags.len());
        prop_assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn non_vip_requests_are_never_lost_with_unbounded_overflow(count in 0usize..60) {
        let mut queues = RequestQueues::default();
        for i in 0..count {
            let (admission, _) = queues.submit(normal(&format!("n{}", i)));
            prop_assert!(matches!(admission, Admission::Queued(_)));
        }
        prop_assert_eq!(queues.len(), count);
    }
}
