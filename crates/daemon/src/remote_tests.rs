// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wg_core::{Direction, RoadPhase};

#[tokio::test]
async fn signal_client_forwards_state_changes() {
    let (tx, mut rx) = mpsc::channel(PUSH_BUFFER);
    let client = RemoteSignalClient::new("Pair_A", tx);
    let update = SignalUpdate::new(Direction::A, RoadPhase::Green);

    client.on_state_changed(update).await.unwrap();

    assert_eq!(client.client_id(), "Pair_A");
    assert_eq!(rx.recv().await, Some(Push::StateChanged { update }));
}

#[tokio::test]
async fn closed_connection_is_unreachable() {
    let (tx, rx) = mpsc::channel(PUSH_BUFFER);
    drop(rx);
    let client = RemoteSignalClient::new("Pair_B", tx);

    let result = client
        .on_state_changed(SignalUpdate::new(Direction::B, RoadPhase::AllStop))
        .await;

    assert!(matches!(result, Err(PushError::Unreachable(_))));
}

#[tokio::test(start_paused = true)]
async fn full_buffer_times_out() {
    let (tx, _rx) = mpsc::channel(1);
    let console = RemoteOperatorConsole::new(Some("op-1".to_string()), tx);

    console.acknowledge("first").await.unwrap();
    let result = console.acknowledge("second").await;

    assert!(matches!(result, Err(PushError::Timeout)));
}

#[tokio::test]
async fn operator_console_forwards_acknowledgements() {
    let (tx, mut rx) = mpsc::channel(PUSH_BUFFER);
    let console = RemoteOperatorConsole::new(None, tx);

    console.acknowledge("Override to B accepted").await.unwrap();

    assert_eq!(console.operator_id(), None);
    assert_eq!(
        rx.recv().await,
        Some(Push::Acknowledge {
            message: "Override to B accepted".to_string()
        })
    );
}
