//! Liveness probes for the dev server and the conflicting service.
//!
//! Both probes absorb every failure mode into `false`; nothing in this
//! module surfaces an error to callers.

use std::time::Duration;

use crate::command;
use crate::config::{ConflictConfig, ServerConfig};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Check whether the dev server answers its health endpoint.
///
/// True only on a successful (2xx-equivalent) response. Connection
/// failures, non-success statuses, and timeouts all read as "down".
pub fn server_up(config: &ServerConfig) -> bool {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(PROBE_TIMEOUT)
        .timeout(PROBE_TIMEOUT)
        .build();

    // ureq returns Err for both transport failures and non-2xx statuses,
    // which is exactly the up/down split the probe wants.
    agent.get(&config.health_url).call().is_ok()
}

/// Check whether the conflicting container is present and running.
///
/// Interprets `docker ps` output by substring only; a failed docker
/// invocation reads as "not running".
pub fn conflicting_up(config: &ConflictConfig) -> bool {
    if !config.is_configured() {
        return false;
    }

    let query = format!(
        "docker ps --filter name={} --format '{{{{.Names}}}} {{{{.Status}}}}'",
        config.container
    );
    match command::sh(&query) {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            stdout.contains(&config.container) && stdout.contains("Up")
        }
        _ => false,
    }
}
