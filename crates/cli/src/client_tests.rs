// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for daemon client behavior against a scripted daemon.

use super::*;
use tokio::net::TcpListener;
use wg_core::{RoadPhase, SignalUpdate};
use wg_daemon::protocol::DEFAULT_TIMEOUT;

/// Accept one connection, check the request, reply, then send pushes
async fn scripted_daemon(
    expect: fn(&Request) -> bool,
    response: Response,
    pushes: Vec<Push>,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (mut reader, mut writer) = stream.into_split();
        let request = protocol::read_request(&mut reader, DEFAULT_TIMEOUT)
            .await
            .unwrap();
        assert!(expect(&request), "unexpected request {:?}", request);
        protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
            .await
            .unwrap();
        for push in pushes {
            protocol::write_push(&mut writer, &push, DEFAULT_TIMEOUT)
                .await
                .unwrap();
        }
    });

    addr
}

#[test]
fn flag_wins_over_environment() {
    assert_eq!(
        daemon_addr(Some("10.0.0.1:7420".into()), Some("10.0.0.2:7420".into())),
        "10.0.0.1:7420"
    );
    assert_eq!(
        daemon_addr(None, Some("10.0.0.2:7420".into())),
        "10.0.0.2:7420"
    );
    assert_eq!(daemon_addr(None, None), DEFAULT_ADDR);
}

#[tokio::test]
async fn hello_returns_daemon_version() {
    let addr = scripted_daemon(
        |r| matches!(r, Request::Hello { .. }),
        Response::Hello {
            version: "9.9.9".to_string(),
        },
        vec![],
    )
    .await;

    let version = DaemonClient::new(addr).hello().await.unwrap();
    assert_eq!(version, "9.9.9");
}

#[tokio::test]
async fn rejected_override_carries_reason() {
    let addr = scripted_daemon(
        |r| {
            matches!(r, Request::RequestOverride { direction: Direction::B, operator_id }
                if operator_id == "op-1")
        },
        Response::Override {
            accepted: false,
            reason: Some("a transition is already in progress".to_string()),
        },
        vec![],
    )
    .await;

    let reply = DaemonClient::new(addr)
        .request_override(Direction::B, "op-1")
        .await
        .unwrap();
    assert_eq!(
        reply,
        OverrideReply::Rejected("a transition is already in progress".to_string())
    );
}

#[tokio::test]
async fn error_response_is_rejected() {
    let addr = scripted_daemon(
        |r| matches!(r, Request::RecentEvents),
        Response::Error {
            message: "audit log unavailable".to_string(),
        },
        vec![],
    )
    .await;

    let result = DaemonClient::new(addr).recent_events().await;
    assert!(matches!(result, Err(ClientError::Rejected(m)) if m == "audit log unavailable"));
}

#[tokio::test]
async fn mismatched_response_is_unexpected() {
    let addr = scripted_daemon(|r| matches!(r, Request::Status), Response::Ok, vec![]).await;

    let result = DaemonClient::new(addr).status().await;
    assert!(matches!(result, Err(ClientError::UnexpectedResponse)));
}

#[tokio::test]
async fn dropped_demand_has_no_tier() {
    let addr = scripted_daemon(
        |r| matches!(r, Request::SubmitDemand { is_vip: false, proximity: 40, .. }),
        Response::Submitted { tier: None },
        vec![],
    )
    .await;

    let tier = DaemonClient::new(addr)
        .submit_demand("Pair_A", Direction::A, false, 40)
        .await
        .unwrap();
    assert_eq!(tier, None);
}

#[tokio::test]
async fn refused_connection_means_daemon_not_running() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let result = DaemonClient::new(addr.clone()).hello().await;
    assert!(matches!(result, Err(ClientError::DaemonNotRunning(a)) if a == addr));
}

#[tokio::test]
async fn subscription_yields_pushes_until_close() {
    let update = SignalUpdate::new(Direction::A, RoadPhase::Yellow);
    let addr = scripted_daemon(
        |r| matches!(r, Request::RegisterSignal { client_id, .. } if client_id == "Pair_A"),
        Response::Registered {
            id: "Pair_A".to_string(),
        },
        vec![Push::StateChanged { update }],
    )
    .await;

    let mut subscription = DaemonClient::new(addr)
        .register_signal("Pair_A", Direction::A)
        .await
        .unwrap();

    assert_eq!(subscription.id(), "Pair_A");
    assert_eq!(
        subscription.next().await,
        Some(Push::StateChanged { update })
    );
    assert_eq!(subscription.next().await, None);
}
