// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol between `wgd` and its clients.
//!
//! Every frame is a 4-byte big-endian length followed by a JSON body.
//! Ordinary connections carry one request and one response. After a
//! `RegisterSignal` or `RegisterOperator` request is answered, the
//! connection stays open and the server writes [`Push`] frames to it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use wg_core::{AuditEvent, Direction, QueueTier, SignalUpdate, StatusSnapshot};

pub use wg_engine::ControllerStatus;

/// Protocol version reported in `Hello`
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-read/write timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest accepted frame body
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Requests from signal clients, operator consoles and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    Hello {
        version: String,
    },
    /// Register a signal head; the connection then receives `StateChanged`
    RegisterSignal {
        client_id: String,
        direction: Direction,
    },
    SubmitDemand {
        client_id: String,
        direction: Direction,
        is_vip: bool,
        proximity: u32,
    },
    /// Register an operator console; the connection then receives
    /// `StatusSnapshot` and `Acknowledge`
    RegisterOperator {
        operator_id: Option<String>,
    },
    RequestOverride {
        direction: Direction,
        operator_id: String,
    },
    RecentEvents,
    Status,
    Shutdown,
}

/// Responses to requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Hello {
        version: String,
    },
    Ok,
    Registered {
        id: String,
    },
    /// Demand admission; `tier` is `None` when the demand was dropped
    Submitted {
        tier: Option<QueueTier>,
    },
    Override {
        accepted: bool,
        reason: Option<String>,
    },
    Events {
        events: Vec<AuditEvent>,
    },
    Status {
        status: Box<ControllerStatus>,
        uptime_secs: u64,
    },
    ShuttingDown,
    Error {
        message: String,
    },
}

/// Server-initiated messages on registration connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Push {
    StateChanged { update: SignalUpdate },
    StatusSnapshot { snapshot: StatusSnapshot },
    Acknowledge { message: String },
}

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Timeout")]
    Timeout,

    #[error("Connection closed")]
    ConnectionClosed,
}

/// Serialize a value to JSON without the length prefix
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize a JSON body
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write one length-prefixed frame
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: data.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    let len = data.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed frame
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}

/// Read and decode one frame within `timeout`
pub async fn read_frame<T: DeserializeOwned, R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<T, ProtocolError> {
    let bytes = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&bytes)
}

/// Encode and write one frame within `timeout`
pub async fn write_frame<T: Serialize, W: AsyncWrite + Unpin>(
    writer: &mut W,
    value: &T,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let data = encode(value)?;
    tokio::time::timeout(timeout, write_message(writer, &data))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    read_frame(reader, timeout).await
}

pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    write_frame(writer, response, timeout).await
}

pub async fn write_push<W: AsyncWrite + Unpin>(
    writer: &mut W,
    push: &Push,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    write_frame(writer, push, timeout).await
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
