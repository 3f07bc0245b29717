//! Configuration for greenloop projects.
//!
//! All external command strings, endpoints, paths, and poll budgets live
//! here so the core never hardcodes a collaborator. Loaded from the nearest
//! ancestor `.greenloop.yaml` (whose directory becomes the working
//! directory), falling back to a global config, falling back to defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths::{DEFAULT_LOG_FILE, PROJECT_CONFIG};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub conflict: ConflictConfig,
}

/// The managed dev server: how to launch it, how to observe it, how to
/// find it for termination.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Shell command that launches the server in the foreground.
    #[serde(default = "default_server_command")]
    pub command: String,
    /// Health endpoint; any non-error HTTP response means "up".
    #[serde(default = "default_health_url")]
    pub health_url: String,
    /// Where the detached server's stdout/stderr land.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Pattern handed to `pkill -f` when stopping the server.
    #[serde(default = "default_process_pattern")]
    pub process_pattern: String,
    /// Readiness poll budget: attempts x interval bounds the wait.
    #[serde(default = "default_start_attempts")]
    pub start_attempts: usize,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// The external test runner, invoked as opaque shell commands.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// List-only invocation: one test identifier per output line.
    #[serde(default = "default_list_command")]
    pub list_command: String,
    /// Single-test invocation; `{test}` is replaced with the identifier.
    #[serde(default = "default_run_command")]
    pub run_command: String,
    /// Full-suite invocation used by batch/CI mode.
    #[serde(default = "default_suite_command")]
    pub suite_command: String,
    /// Lines starting with this prefix are runner summary noise, not tests.
    #[serde(default = "default_list_summary_prefix")]
    pub list_summary_prefix: String,
}

/// A mutually-exclusive external service occupying the server's port.
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictConfig {
    /// Container name to look for in `docker ps` output.
    #[serde(default = "default_conflict_container")]
    pub container: String,
    /// Compose-style shutdown command, best-effort.
    #[serde(default = "default_down_command")]
    pub down_command: String,
}

fn default_server_command() -> String {
    "pnpm dev:server".to_string()
}

fn default_health_url() -> String {
    "http://localhost:8008/health".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_process_pattern() -> String {
    "dev:server".to_string()
}

fn default_start_attempts() -> usize {
    30
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_list_command() -> String {
    "npx jest --listTests 2>/dev/null".to_string()
}

fn default_run_command() -> String {
    "npx jest --forceExit --no-coverage --testNamePattern='{test}'".to_string()
}

fn default_suite_command() -> String {
    "pnpm test:integration".to_string()
}

fn default_list_summary_prefix() -> String {
    "Test Suites".to_string()
}

fn default_conflict_container() -> String {
    String::new()
}

fn default_down_command() -> String {
    String::new()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_server_command(),
            health_url: default_health_url(),
            log_file: default_log_file(),
            process_pattern: default_process_pattern(),
            start_attempts: default_start_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            list_command: default_list_command(),
            run_command: default_run_command(),
            suite_command: default_suite_command(),
            list_summary_prefix: default_list_summary_prefix(),
        }
    }
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            container: default_conflict_container(),
            down_command: default_down_command(),
        }
    }
}

impl ServerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ConflictConfig {
    /// A conflict check is only meaningful when a container is named.
    pub fn is_configured(&self) -> bool {
        !self.container.is_empty()
    }
}

impl Config {
    /// Load configuration, fixing the working directory to the project root.
    ///
    /// Search order:
    /// 1. Nearest ancestor `.greenloop.yaml` - its directory becomes the cwd
    /// 2. Global config (`~/.config/greenloop/config.yaml`)
    /// 3. Compiled-in defaults
    pub fn load() -> Result<Self> {
        if let Some(project_config) = find_project_config()? {
            let root = project_config
                .parent()
                .context("Project config has no parent directory")?;
            env::set_current_dir(root).with_context(|| {
                format!("Failed to change directory to {}", root.display())
            })?;
            return Self::load_from(&project_config);
        }

        if let Some(global) = global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config YAML")
    }
}

/// Walk upward from the cwd looking for the project config file.
fn find_project_config() -> Result<Option<PathBuf>> {
    let mut dir = env::current_dir().context("Failed to read current directory")?;
    loop {
        let candidate = dir.join(PROJECT_CONFIG);
        if candidate.exists() {
            return Ok(Some(candidate));
        }
        if !dir.pop() {
            return Ok(None);
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("greenloop").join("config.yaml"))
}
