// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn try_acquire_fails_while_held_and_names_holder() {
    let arbiter = AccessArbiter::new(Direction::A);

    let guard = arbiter.acquire(Initiator::Dispatcher).await;
    let denied = arbiter.try_acquire(Initiator::operator("op-1"));

    assert!(matches!(denied, Err(Some(Initiator::Dispatcher))));
    assert_eq!(guard.holder(), &Initiator::Dispatcher);
    assert_eq!(arbiter.holder(), Some(Initiator::Dispatcher));
}

#[tokio::test]
async fn dropping_guard_frees_gate_and_lock() {
    let arbiter = AccessArbiter::new(Direction::A);

    let guard = arbiter.try_acquire(Initiator::operator("op-1")).ok().unwrap();
    drop(guard);

    assert_eq!(arbiter.holder(), None);
    assert!(arbiter.try_acquire(Initiator::Dispatcher).is_ok());
}

#[tokio::test(start_paused = true)]
async fn waiting_acquire_proceeds_after_release() {
    let arbiter = Arc::new(AccessArbiter::new(Direction::A));
    let guard = arbiter.try_acquire(Initiator::operator("op-1")).ok().unwrap();

    let waiter = {
        let arbiter = Arc::clone(&arbiter);
        tokio::spawn(async move {
            let guard = arbiter.acquire(Initiator::Dispatcher).await;
            guard.holder().clone()
        })
    };

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!waiter.is_finished());

    drop(guard);
    assert_eq!(waiter.await.unwrap(), Initiator::Dispatcher);
}

#[tokio::test]
async fn cancelled_holder_releases_lock() {
    let arbiter = Arc::new(AccessArbiter::new(Direction::A));

    let task = {
        let arbiter = Arc::clone(&arbiter);
        tokio::spawn(async move {
            let _guard = arbiter.acquire(Initiator::Dispatcher).await;
            std::future::pending::<()>().await;
        })
    };
    tokio::task::yield_now().await;
    task.abort();
    let _ = task.await;

    assert!(arbiter.try_acquire(Initiator::operator("op-1")).is_ok());
}

#[test]
fn status_starts_with_initial_direction_green() {
    let arbiter = AccessArbiter::new(Direction::B);
    let status = arbiter.status();

    assert_eq!(status.active, Direction::B);
    assert!(!status.in_transition);
    assert_eq!(status.green_directions(), vec![Direction::B]);
}

#[tokio::test]
async fn guard_gives_mutable_access_to_state() {
    let arbiter = AccessArbiter::new(Direction::A);
    let mut guard = arbiter.acquire(Initiator::Dispatcher).await;

    let decision = guard.mutex.request_access(Direction::B);

    assert!(decision.granted);
    assert!(guard.controller.check(Direction::B).is_ok());
}
