//! Dev-server lifecycle: start, stop, restart, and conflicting-service
//! shutdown.
//!
//! All failure here is downgraded to booleans; the operator-facing story
//! for a bad start is the log file, not an error chain. A server that
//! fails its readiness budget is deliberately left running so it can be
//! diagnosed from its logs.

use std::thread;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::command;
use crate::config::{ConflictConfig, ServerConfig};
use crate::poll;
use crate::probe;

/// Settle delay between stop and start on restart.
const RESTART_SETTLE: Duration = Duration::from_secs(1);

/// Start the dev server if it is not already up.
///
/// Idempotent: an already-healthy server succeeds without spawning.
/// Otherwise the configured command is spawned detached with output
/// redirected to the log file, and readiness is polled within the
/// configured budget. Returns `true` on the first successful probe,
/// `false` once the budget is exhausted.
pub fn start(config: &ServerConfig) -> bool {
    if probe::server_up(config) {
        println!("{} Server already running", "✓".green());
        return true;
    }

    println!("{} Starting server...", "▶".yellow());
    let pid = match command::spawn_logged(&config.command, &config.log_file) {
        Ok(pid) => pid,
        Err(e) => {
            eprintln!("{} Failed to launch server: {:#}", "✗".red(), e);
            return false;
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("waiting for server to become healthy...");

    let ready = poll::wait_for(config.start_attempts, config.poll_interval(), || {
        spinner.tick();
        probe::server_up(config)
    });
    spinner.finish_and_clear();

    if ready {
        println!("{} Server ready (pid {})", "✓".green(), pid);
        println!(
            "{} Logs: tail -f {}",
            "•".cyan(),
            config.log_file.display()
        );
    } else {
        eprintln!("{} Server failed to become healthy", "✗".red());
        eprintln!(
            "{} Check logs: cat {}",
            "→".yellow(),
            config.log_file.display()
        );
    }
    ready
}

/// Best-effort termination by process-pattern match. Finding nothing to
/// kill is not an error.
pub fn stop(config: &ServerConfig) {
    let _ = command::sh(&format!("pkill -f '{}'", config.process_pattern));
}

/// Stop, settle, start. Returns the start result.
pub fn restart(config: &ServerConfig) -> bool {
    println!("{} Restarting server...", "↻".yellow());
    stop(config);
    thread::sleep(RESTART_SETTLE);
    start(config)
}

/// Best-effort shutdown of the conflicting service.
///
/// A down command that cannot even be invoked is swallowed; the return
/// value reflects whether the command itself reported success.
pub fn stop_conflicting(config: &ConflictConfig) -> bool {
    if config.down_command.is_empty() {
        return false;
    }
    println!("{} Stopping conflicting service...", "⏹".yellow());
    let stopped = command::sh(&config.down_command)
        .map(|output| output.status.success())
        .unwrap_or(false);
    if stopped {
        println!("{} Conflicting service stopped", "✓".green());
    }
    stopped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Config pointing at a dead port with a minimal poll budget, so tests
    /// never wait long and never spawn a real server.
    fn never_healthy(dir: &std::path::Path, attempts: usize) -> ServerConfig {
        ServerConfig {
            command: "true".to_string(),
            health_url: "http://127.0.0.1:9/health".to_string(),
            log_file: dir.join("server.log"),
            process_pattern: "greenloop-test-no-such-process".to_string(),
            start_attempts: attempts,
            poll_interval_ms: 1,
        }
    }

    /// Minimal always-200 health endpoint on an ephemeral port.
    fn spawn_health_endpoint() -> String {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 512];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                );
            }
        });
        format!("http://{}/health", addr)
    }

    #[test]
    fn start_on_healthy_server_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("spawned");
        let config = ServerConfig {
            command: format!("touch {}", marker.display()),
            health_url: spawn_health_endpoint(),
            log_file: dir.path().join("server.log"),
            process_pattern: "greenloop-test-no-such-process".to_string(),
            start_attempts: 3,
            poll_interval_ms: 1,
        };

        assert!(start(&config));
        assert!(!marker.exists());
    }

    #[test]
    fn start_fails_after_budget_and_leaves_log_behind() {
        let dir = tempfile::tempdir().unwrap();
        let config = never_healthy(dir.path(), 3);

        assert!(!start(&config));
        assert!(config.log_file.exists());
    }

    #[test]
    fn stop_tolerates_missing_process() {
        let dir = tempfile::tempdir().unwrap();
        stop(&never_healthy(dir.path(), 1));
    }

    #[test]
    fn stop_conflicting_without_command_is_a_noop() {
        assert!(!stop_conflicting(&ConflictConfig::default()));
    }

    #[test]
    fn stop_conflicting_reports_command_success() {
        let config = ConflictConfig {
            container: "x".to_string(),
            down_command: "true".to_string(),
        };
        assert!(stop_conflicting(&config));

        let config = ConflictConfig {
            container: "x".to_string(),
            down_command: "false".to_string(),
        };
        assert!(!stop_conflicting(&config));
    }

    #[test]
    fn log_file_parent_must_exist_for_launch() {
        let config = ServerConfig {
            command: "true".to_string(),
            health_url: "http://127.0.0.1:9/health".to_string(),
            log_file: PathBuf::from("/no/such/dir/server.log"),
            process_pattern: "greenloop-test-no-such-process".to_string(),
            start_attempts: 1,
            poll_interval_ms: 1,
        };
        assert!(!start(&config));
    }
}
