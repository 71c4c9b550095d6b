// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::time::Duration;

use thiserror::Error;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use wg_core::{AuditEvent, Direction, QueueTier};
use wg_daemon::protocol::{self, ControllerStatus, ProtocolError, PROTOCOL_VERSION};
use wg_daemon::{Push, Request, Response};

/// Where `wgd` listens unless told otherwise
pub const DEFAULT_ADDR: &str = "127.0.0.1:7420";

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("WG_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// Daemon address: `--addr` flag, then `WG_ADDR`, then the default
pub fn daemon_addr(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env).unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running at {0}")]
    DaemonNotRunning(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of an override request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideReply {
    Accepted,
    Rejected(String),
}

/// An open registration connection.
///
/// Pushes are read by a background task, so [`Subscription::next`] is safe to
/// use inside `select!`. The write half is held so the daemon does not see
/// the connection close.
pub struct Subscription {
    id: String,
    pushes: mpsc::Receiver<Push>,
    _writer: OwnedWriteHalf,
}

impl Subscription {
    /// Id the daemon registered this connection under
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Next push, or `None` once the daemon closes the connection
    pub async fn next(&mut self) -> Option<Push> {
        self.pushes.recv().await
    }
}

/// Daemon client
pub struct DaemonClient {
    addr: String,
}

impl DaemonClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn connect(&self) -> Result<TcpStream, ClientError> {
        match tokio::time::timeout(timeout_ipc(), TcpStream::connect(&self.addr)).await {
            Err(_) => Err(ProtocolError::Timeout.into()),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
                Err(ClientError::DaemonNotRunning(self.addr.clone()))
            }
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(stream)) => Ok(stream),
        }
    }

    async fn send_with_timeout(
        &self,
        request: Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        let stream = self.connect().await?;
        let (mut reader, mut writer) = stream.into_split();

        protocol::write_frame(&mut writer, &request, write_timeout).await?;
        let response: Response = protocol::read_frame(&mut reader, read_timeout).await?;
        Ok(response)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Exchange versions with the daemon
    pub async fn hello(&self) -> Result<String, ClientError> {
        match self
            .send(Request::Hello {
                version: PROTOCOL_VERSION.to_string(),
            })
            .await?
        {
            Response::Hello { version } => Ok(version),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Submit a demand; `None` means every queue was full
    pub async fn submit_demand(
        &self,
        client_id: &str,
        direction: Direction,
        is_vip: bool,
        proximity: u32,
    ) -> Result<Option<QueueTier>, ClientError> {
        match self
            .send(Request::SubmitDemand {
                client_id: client_id.to_string(),
                direction,
                is_vip,
                proximity,
            })
            .await?
        {
            Response::Submitted { tier } => Ok(tier),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn request_override(
        &self,
        direction: Direction,
        operator_id: &str,
    ) -> Result<OverrideReply, ClientError> {
        match self
            .send(Request::RequestOverride {
                direction,
                operator_id: operator_id.to_string(),
            })
            .await?
        {
            Response::Override { accepted: true, .. } => Ok(OverrideReply::Accepted),
            Response::Override {
                accepted: false,
                reason,
            } => Ok(OverrideReply::Rejected(
                reason.unwrap_or_else(|| "no reason given".to_string()),
            )),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Most recent audit events, newest first
    pub async fn recent_events(&self) -> Result<Vec<AuditEvent>, ClientError> {
        match self.send(Request::RecentEvents).await? {
            Response::Events { events } => Ok(events),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Controller status and daemon uptime in seconds
    pub async fn status(&self) -> Result<(ControllerStatus, u64), ClientError> {
        match self.send(Request::Status).await? {
            Response::Status {
                status,
                uptime_secs,
            } => Ok((*status, uptime_secs)),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Ask the daemon to stop
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(Request::Shutdown).await? {
            Response::ShuttingDown | Response::Ok => Ok(()),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Register a signal head and keep the connection for state changes
    pub async fn register_signal(
        &self,
        client_id: &str,
        direction: Direction,
    ) -> Result<Subscription, ClientError> {
        self.subscribe(Request::RegisterSignal {
            client_id: client_id.to_string(),
            direction,
        })
        .await
    }

    /// Register an operator console and keep the connection for snapshots
    pub async fn register_operator(
        &self,
        operator_id: Option<&str>,
    ) -> Result<Subscription, ClientError> {
        self.subscribe(Request::RegisterOperator {
            operator_id: operator_id.map(str::to_string),
        })
        .await
    }

    async fn subscribe(&self, request: Request) -> Result<Subscription, ClientError> {
        let stream = self.connect().await?;
        let (mut reader, mut writer) = stream.into_split();

        protocol::write_frame(&mut writer, &request, timeout_ipc()).await?;
        let response: Response = protocol::read_frame(&mut reader, timeout_ipc()).await?;
        let id = match response {
            Response::Registered { id } => id,
            Response::Error { message } => return Err(ClientError::Rejected(message)),
            _ => return Err(ClientError::UnexpectedResponse),
        };

        let (tx, pushes) = mpsc::channel(32);
        tokio::spawn(async move {
            loop {
                let push = match protocol::read_message(&mut reader).await {
                    Ok(bytes) => protocol::decode::<Push>(&bytes),
                    Err(ProtocolError::ConnectionClosed) => return,
                    Err(e) => Err(e),
                };
                match push {
                    Ok(push) => {
                        if tx.send(push).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping subscription");
                        return;
                    }
                }
            }
        });

        Ok(Subscription {
            id,
            pushes,
            _writer: writer,
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
