// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TCP server and connection handling.

use std::sync::Arc;
use std::time::Instant;

use tokio::io::AsyncReadExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};
use wg_adapters::{AuditSink, TracedOperatorConsole, TracedSignalClient};
use wg_core::{Admission, DemandRequest, IdGen};
use wg_daemon::protocol::{
    self, ProtocolError, Push, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};
use wg_engine::{Controller, OverrideOutcome};

use crate::remote::{RemoteOperatorConsole, RemoteSignalClient, PUSH_BUFFER};

/// State shared by every connection
pub struct Server<A, I> {
    controller: Controller<A, I>,
    shutdown: watch::Sender<bool>,
    start_time: Instant,
}

impl<A: AuditSink, I: IdGen> Server<A, I> {
    pub fn new(controller: Controller<A, I>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            controller,
            shutdown,
            start_time: Instant::now(),
        }
    }

    /// Flips to `true` when a client sends `Shutdown`
    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

/// Handle a single client connection.
///
/// Registration requests keep the connection open for pushes until the
/// client disconnects; every other request gets one response.
pub async fn handle_connection<A: AuditSink, I: IdGen>(
    server: &Server<A, I>,
    stream: TcpStream,
) -> Result<(), ServerError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    match request {
        Request::RegisterSignal {
            client_id,
            direction,
        } => {
            let (tx, rx) = mpsc::channel(PUSH_BUFFER);
            let client = TracedSignalClient::new(RemoteSignalClient::new(client_id.clone(), tx));
            server
                .controller
                .register_signal_client(Arc::new(client), direction)
                .await;

            let response = Response::Registered {
                id: client_id.clone(),
            };
            protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;

            serve_pushes(reader, writer, rx).await;
            info!(client_id, %direction, "signal client disconnected");
            Ok(())
        }

        Request::RegisterOperator { operator_id } => {
            let (tx, rx) = mpsc::channel(PUSH_BUFFER);
            let console = TracedOperatorConsole::new(RemoteOperatorConsole::new(operator_id, tx));
            let registration_id = server.controller.register_operator(Arc::new(console)).await;

            let response = Response::Registered {
                id: registration_id.clone(),
            };
            let written = protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await;
            if written.is_ok() {
                serve_pushes(reader, writer, rx).await;
            }

            if server.controller.deregister_operator(&registration_id) {
                info!(registration_id, "operator console disconnected");
            }
            written.map_err(ServerError::Protocol)
        }

        request => {
            let response = handle_request(server, request).await;
            debug!("Sending response: {:?}", response);
            protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
            Ok(())
        }
    }
}

/// Forward queued pushes until the client goes away
async fn serve_pushes(
    mut reader: OwnedReadHalf,
    mut writer: OwnedWriteHalf,
    mut rx: mpsc::Receiver<Push>,
) {
    let mut probe = [0u8; 64];
    loop {
        tokio::select! {
            push = rx.recv() => {
                let Some(push) = push else { return };
                if let Err(e) = protocol::write_push(&mut writer, &push, DEFAULT_TIMEOUT).await {
                    warn!(error = %e, "push write failed");
                    return;
                }
            }
            read = reader.read(&mut probe) => match read {
                Ok(0) | Err(_) => return,
                // Registered clients have nothing more to say
                Ok(_) => {}
            },
        }
    }
}

/// Handle a one-shot request and return a response
async fn handle_request<A: AuditSink, I: IdGen>(
    server: &Server<A, I>,
    request: Request,
) -> Response {
    let controller = &server.controller;
    match request {
        Request::Hello { version } if version != PROTOCOL_VERSION => {
            warn!(client = %version, daemon = PROTOCOL_VERSION, "protocol version mismatch");
            Response::Error {
                message: format!(
                    "protocol version mismatch: client {}, daemon {}",
                    version, PROTOCOL_VERSION
                ),
            }
        }
        Request::Hello { .. } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::SubmitDemand {
            client_id,
            direction,
            is_vip,
            proximity,
        } => {
            let mut demand = DemandRequest::new(client_id, direction).with_proximity(proximity);
            if is_vip {
                demand = demand.vip();
            }
            let tier = match controller.submit_demand(demand).await {
                Admission::Queued(tier) => Some(tier),
                Admission::Dropped => None,
            };
            Response::Submitted { tier }
        }

        Request::RequestOverride {
            direction,
            operator_id,
        } => match controller.request_override(direction, &operator_id).await {
            OverrideOutcome::Accepted => Response::Override {
                accepted: true,
                reason: None,
            },
            OverrideOutcome::Rejected(reason) => Response::Override {
                accepted: false,
                reason: Some(reason.to_string()),
            },
        },

        Request::RecentEvents => match controller.recent_events().await {
            Ok(events) => Response::Events { events },
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        },

        Request::Status => Response::Status {
            status: Box::new(controller.status()),
            uptime_secs: server.start_time.elapsed().as_secs(),
        },

        Request::Shutdown => {
            server.shutdown.send_replace(true);
            Response::ShuttingDown
        }

        Request::RegisterSignal { .. } | Request::RegisterOperator { .. } => Response::Error {
            message: "registration must open its own connection".to_string(),
        },
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
