//! CLI entry point and mode dispatch for greenloop.

mod cmd;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use greenloop::config::Config;
use greenloop::{probe, server, teardown};

#[derive(Parser)]
#[command(name = "greenloop")]
#[command(version)]
#[command(about = "Fix-until-green test iteration against a local dev server", long_about = None)]
#[command(
    after_help = "MODES:\n    greenloop --tdd [FILTER]    One test at a time, retry until green\n    greenloop FILTER            Run a single test by pattern\n    greenloop                   Interactive menu (TTY) or full suite (CI)"
)]
struct Cli {
    /// Iterate tests one at a time, retrying the current test until it passes
    #[arg(long)]
    tdd: bool,
    /// Case-insensitive substring selecting the first (or only) test to run
    #[arg(value_name = "FILTER")]
    filter: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    teardown::install_interrupt_handler(&config.server);
    preflight_conflict(&config);

    let filter = cli.filter.unwrap_or_default();

    if cli.tdd {
        return cmd::tdd::run(&config, &filter);
    }

    // Every remaining mode needs the server before dispatch. Start is
    // idempotent over an already-healthy server.
    if !server::start(&config.server) {
        anyhow::bail!(
            "Server failed to start; check {}",
            config.server.log_file.display()
        );
    }

    if !filter.is_empty() {
        return cmd::single::run(&config, &filter);
    }

    if !atty::is(atty::Stream::Stdin) {
        return cmd::batch::run(&config);
    }

    cmd::interactive::run(&config)
}

/// Warn about a conflicting service occupying the server's port, and on a
/// TTY offer to stop it before continuing.
fn preflight_conflict(config: &Config) {
    if !config.conflict.is_configured() || !probe::conflicting_up(&config.conflict) {
        return;
    }

    println!(
        "{} Conflicting service '{}' is running",
        "⚠".yellow(),
        config.conflict.container.cyan()
    );
    println!("  It occupies the same port as the dev server; they cannot both run.");
    println!();

    if atty::is(atty::Stream::Stdin) {
        let stop_it = dialoguer::Confirm::new()
            .with_prompt("Stop it and continue?")
            .default(true)
            .interact()
            .unwrap_or(false);
        if stop_it {
            server::stop_conflicting(&config.conflict);
        } else {
            println!(
                "{} Conflicting service left running; the dev server may fail to start.",
                "✗".red()
            );
        }
    } else {
        println!(
            "{} Stop it manually with: {}",
            "→".yellow(),
            config.conflict.down_command
        );
    }
}
