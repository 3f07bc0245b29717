//! Single-run mode: one test by pattern, then exit with its result.

use anyhow::Result;
use colored::Colorize;

use greenloop::catalog::TestId;
use greenloop::config::Config;
use greenloop::runner::{ShellRunner, TestRunner};
use greenloop::teardown;

pub fn run(config: &Config, pattern: &str) -> Result<()> {
    println!("{} Running single test: {}", "▶".yellow(), pattern.cyan());
    println!();

    let mut runner = ShellRunner::new(&config.runner);
    let outcome = runner.run(&TestId::new(pattern));

    teardown::stop_server_once(&config.server);
    std::process::exit(if outcome.passed { 0 } else { 1 });
}
