//! Batch/CI mode: no terminal attached, so run the whole suite once,
//! stop the server, and forward the runner's exit status verbatim.

use anyhow::Result;

use greenloop::command;
use greenloop::config::Config;
use greenloop::teardown;

pub fn run(config: &Config) -> Result<()> {
    let status = command::sh_status(&config.runner.suite_command)?;
    teardown::stop_server_once(&config.server);
    std::process::exit(status.code().unwrap_or(1));
}
