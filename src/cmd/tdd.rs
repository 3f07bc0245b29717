//! TDD mode: one test at a time, retry until green.

use anyhow::{bail, Result};
use colored::Colorize;

use greenloop::catalog;
use greenloop::config::Config;
use greenloop::engine::{Command, Session, Step};
use greenloop::runner::ShellRunner;
use greenloop::{logs, server, teardown, ui};

pub fn run(config: &Config, filter: &str) -> Result<()> {
    ui::print_box("TDD Mode - retry until green, then advance", 62);
    println!();

    if !server::start(&config.server) {
        bail!(
            "Server failed to start; check {}",
            config.server.log_file.display()
        );
    }
    println!();

    let queue = catalog::list_tests(&config.runner);
    let mut session = Session::new(queue, filter)?;
    let mut runner = ShellRunner::new(&config.runner);

    while !session.is_done() {
        present(&session);

        let command = match Command::parse(&read_reply("➤")) {
            // The jump target comes from a second prompt.
            Command::Jump(_) => {
                Command::Jump(read_reply(&format!("Jump to test (1-{})", session.total())))
            }
            other => other,
        };
        let skipping = command == Command::Skip;

        match session.apply(command, &mut runner) {
            Step::Advanced => {
                if skipping {
                    println!("{} Skipped", "→".yellow());
                    println!();
                }
            }
            Step::Failed => {
                // The runner already reported the failure; stay put.
            }
            Step::ShowLogs => {
                println!();
                logs::show_recent(&config.server);
                println!();
            }
            Step::Jumped(_) => {
                if let Some(test) = session.current() {
                    println!("{} Jumped to: {}", "✓".green(), test.as_str().cyan());
                }
                println!();
            }
            Step::InvalidJump => {
                println!("{} Invalid test number", "✗".red());
                println!();
            }
            Step::Quit => {
                println!();
                teardown::stop_server_once(&config.server);
                return Ok(());
            }
            Step::Unknown => {
                println!(
                    "{} Unknown command. Press Enter to run the current test.",
                    "✗".red()
                );
            }
        }
    }

    ui::print_box("All tests passed!", 62);
    println!();
    teardown::stop_server_once(&config.server);
    Ok(())
}

/// Show the current test, progress, and the command menu.
fn present(session: &Session) {
    let Some(current) = session.current() else {
        return;
    };

    println!("{}", ui::format::separator(62).bold());
    println!(
        "   Test {}: {}",
        ui::format::progress(session.position(), session.total()).yellow(),
        current.as_str().cyan()
    );
    println!(
        "   Remaining: {} tests",
        session.remaining().to_string().yellow()
    );
    println!("{}", ui::format::separator(62).bold());
    println!(
        "{}  {}=run  {}=skip  {}=logs  {}=jump  {}=quit  (Enter = run)",
        "Commands:".yellow(),
        "r".cyan(),
        "s".cyan(),
        "l".cyan(),
        "j".cyan(),
        "q".cyan()
    );
    println!();
}

/// Read one reply from the operator. EOF (or a closed terminal) reads as
/// quit so the session still tears the server down.
fn read_reply(prompt: &str) -> String {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .unwrap_or_else(|_| "q".to_string())
}
