// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::tempdir;
use wg_core::Direction;

fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_derive_paths_from_xdg_state_home() {
    let config = Config::resolve("", env_of(&[("XDG_STATE_HOME", "/var/state")])).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
    assert_eq!(config.state_dir, PathBuf::from("/var/state/wg"));
    assert_eq!(config.audit_path, PathBuf::from("/var/state/wg/audit.jsonl"));
    assert_eq!(config.log_path, PathBuf::from("/var/state/wg/wgd.log"));
    assert_eq!(config.controller, ControllerConfig::default());
}

#[test]
fn home_is_the_last_fallback() {
    let config = Config::resolve("", env_of(&[("HOME", "/home/ops")])).unwrap();
    assert_eq!(config.state_dir, PathBuf::from("/home/ops/.local/state/wg"));
}

#[test]
fn missing_home_is_an_error() {
    let result = Config::resolve("", env_of(&[]));
    assert!(matches!(result, Err(LifecycleError::NoStateDir)));
}

#[test]
fn file_values_are_used() {
    let content = r#"
bind_addr = "127.0.0.1:9000"
state_dir = "/srv/wg"

[controller]
clearance_interval = "2s"
quorum = 3
initial_direction = "B"
"#;

    let config = Config::resolve(content, env_of(&[])).unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
    assert_eq!(config.audit_path, PathBuf::from("/srv/wg/audit.jsonl"));
    assert_eq!(config.controller.clearance_interval, Duration::from_secs(2));
    assert_eq!(config.controller.min_green_interval, Duration::from_secs(5));
    assert_eq!(config.controller.quorum, 3);
    assert_eq!(config.controller.initial_direction, Direction::B);
}

#[test]
fn environment_overrides_file() {
    let content = r#"
bind_addr = "127.0.0.1:9000"
state_dir = "/srv/wg"
"#;
    let env = env_of(&[
        ("WG_BIND_ADDR", "127.0.0.1:9100"),
        ("WG_STATE_DIR", "/tmp/wg-test"),
    ]);

    let config = Config::resolve(content, env).unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:9100".parse().unwrap());
    assert_eq!(config.state_dir, PathBuf::from("/tmp/wg-test"));
}

#[test]
fn invalid_bind_addr_is_rejected() {
    let env = env_of(&[("WG_BIND_ADDR", "not-an-addr"), ("HOME", "/home/ops")]);
    let result = Config::resolve("", env);
    assert!(matches!(result, Err(LifecycleError::InvalidBindAddr(addr)) if addr == "not-an-addr"));
}

#[test]
fn unknown_keys_are_rejected() {
    let result = Config::resolve("listen = \"x\"", env_of(&[("HOME", "/home/ops")]));
    assert!(matches!(result, Err(LifecycleError::Config(_))));
}

#[test]
fn invalid_controller_values_are_rejected() {
    let content = "[controller]\nnormal_queue_capacity = 0\n";
    let result = Config::resolve(content, env_of(&[("HOME", "/home/ops")]));
    assert!(matches!(result, Err(LifecycleError::Config(_))));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let result = Config::load(Some(&path));
    assert!(matches!(result, Err(LifecycleError::ConfigRead(p, _)) if p == path));
}

#[tokio::test]
async fn startup_creates_state_dir_and_binds() {
    let dir = tempdir().unwrap();
    let state_dir = dir.path().join("state");
    let env = env_of(&[
        ("WG_BIND_ADDR", "127.0.0.1:0"),
        ("WG_STATE_DIR", state_dir.to_str().unwrap()),
    ]);
    let config = Config::resolve("", env).unwrap();

    let daemon = startup(&config).await.unwrap();

    assert!(state_dir.is_dir());
    assert!(config.audit_path.exists());
    assert_ne!(daemon.local_addr.port(), 0);
    daemon.shutdown().await.unwrap();
}

#[tokio::test]
async fn startup_fails_when_address_is_taken() {
    let dir = tempdir().unwrap();
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();
    let env = env_of(&[
        ("WG_BIND_ADDR", addr.as_str()),
        ("WG_STATE_DIR", dir.path().to_str().unwrap()),
    ]);
    let config = Config::resolve("", env).unwrap();

    let result = startup(&config).await;
    assert!(matches!(result, Err(LifecycleError::BindFailed(..))));
}
