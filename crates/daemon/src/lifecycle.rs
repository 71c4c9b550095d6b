// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use wg_adapters::{AuditError, FileAuditSink, TracedAuditSink};
use wg_core::{ConfigError, ControllerConfig, UuidIdGen};
use wg_engine::{Controller, EngineError};

/// Controller with the production audit sink (wrapped with tracing)
pub type DaemonController = Controller<TracedAuditSink<FileAuditSink>, UuidIdGen>;

/// Address the daemon listens on when nothing else is configured
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7420";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the TCP listener
    pub bind_addr: SocketAddr,
    /// Directory holding the audit log and daemon log
    pub state_dir: PathBuf,
    /// Path to the JSON-lines audit log
    pub audit_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    pub controller: ControllerConfig,
}

/// On-disk `wgd.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    bind_addr: Option<SocketAddr>,
    state_dir: Option<PathBuf>,
    controller: ControllerConfig,
}

impl Config {
    /// Load from an optional `wgd.toml`, with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, LifecycleError> {
        let content = match path {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| LifecycleError::ConfigRead(path.to_path_buf(), e))?,
            None => String::new(),
        };
        Self::resolve(&content, |key| std::env::var(key).ok())
    }

    /// Build a config from TOML content and an environment lookup.
    ///
    /// Environment values win over the file; the file wins over defaults.
    pub fn resolve(
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LifecycleError> {
        let file: ConfigFile = toml::from_str(content).map_err(ConfigError::from)?;
        file.controller.validate()?;

        let bind_addr = match env("WG_BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| LifecycleError::InvalidBindAddr(addr))?,
            None => match file.bind_addr {
                Some(addr) => addr,
                None => DEFAULT_BIND_ADDR
                    .parse()
                    .map_err(|_| LifecycleError::InvalidBindAddr(DEFAULT_BIND_ADDR.to_string()))?,
            },
        };

        let state_dir = match env("WG_STATE_DIR").map(PathBuf::from).or(file.state_dir) {
            Some(dir) => dir,
            None => default_state_dir(&env)?,
        };

        Ok(Self {
            bind_addr,
            audit_path: state_dir.join("audit.jsonl"),
            log_path: state_dir.join("wgd.log"),
            state_dir,
            controller: file.controller,
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    /// TCP listener
    pub listener: TcpListener,
    /// Address actually bound (differs from config when binding port 0)
    pub local_addr: SocketAddr,
    pub controller: DaemonController,
}

impl DaemonState {
    /// Shutdown the daemon gracefully
    pub async fn shutdown(&self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");
        self.controller.shutdown().await?;
        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to read config at {0}: {1}")]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddr(String),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    // State directory holds the audit log and log file
    std::fs::create_dir_all(&config.state_dir)?;

    // Open the audit log BEFORE binding (fail fast, don't accept connections without it)
    let audit = TracedAuditSink::new(FileAuditSink::open(&config.audit_path)?);
    let controller = Controller::new(config.controller.clone(), audit, UuidIdGen);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.bind_addr, e))?;
    let local_addr = listener.local_addr()?;

    info!(
        bind_addr = %local_addr,
        audit_path = %config.audit_path.display(),
        quorum = config.controller.quorum,
        "Daemon started"
    );

    Ok(DaemonState {
        listener,
        local_addr,
        controller,
    })
}

/// Get the state directory for wg
fn default_state_dir(env: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, LifecycleError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Some(xdg) = env("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("wg"));
    }

    let home = env("HOME").ok_or(LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/wg"))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
