//! Lowest-level shell invocation.
//!
//! Every external process greenloop touches goes through one of these three
//! wrappers. Each returns `Result`, and each call site decides explicitly
//! whether to absorb a failure into a boolean or propagate it.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Run a shell command capturing stdout and stderr.
///
/// # Errors
///
/// Returns an error only if the command could not be invoked at all; a
/// nonzero exit status is reported through [`Output::status`], not as an
/// error.
pub fn sh(command: &str) -> Result<Output> {
    Command::new("sh")
        .args(["-c", command])
        .output()
        .with_context(|| format!("Failed to run: {}", command))
}

/// Run a shell command with inherited stdio, blocking until it exits.
///
/// Used for the test runner so assertion output streams straight to the
/// operator's terminal.
pub fn sh_status(command: &str) -> Result<ExitStatus> {
    Command::new("sh")
        .args(["-c", command])
        .status()
        .with_context(|| format!("Failed to run: {}", command))
}

/// Spawn a shell command detached, with stdout and stderr appended to the
/// given log file. The child is not waited on; callers observe it only
/// through external liveness probes.
pub fn spawn_logged(command: &str, log_file: &Path) -> Result<u32> {
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;
    let log_err = log
        .try_clone()
        .context("Failed to clone log file handle")?;

    let child = Command::new("sh")
        .args(["-c", command])
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .with_context(|| format!("Failed to spawn: {}", command))?;

    Ok(child.id())
}
