//! Interactive menu mode.

use anyhow::Result;
use colored::Colorize;

use greenloop::catalog::{self, TestId};
use greenloop::command;
use greenloop::config::Config;
use greenloop::runner::{ShellRunner, TestRunner};
use greenloop::{logs, server, teardown, ui};

pub fn run(config: &Config) -> Result<()> {
    print_menu();

    loop {
        let input = read_reply("> ");
        match input.trim().to_lowercase().as_str() {
            "t" => {
                let passed = command::sh_status(&config.runner.suite_command)
                    .map(|status| status.success())
                    .unwrap_or(false);
                if passed {
                    println!("{} All tests passed!", "✓".green());
                } else {
                    println!("{} Tests failed", "✗".red());
                }
            }
            "o" => {
                let pattern = read_reply("Test name or pattern");
                if pattern.trim().is_empty() {
                    println!("{} No pattern given", "✗".red());
                    continue;
                }
                let mut runner = ShellRunner::new(&config.runner);
                runner.run(&TestId::new(pattern.trim()));
            }
            "--" => {
                let tests = catalog::list_tests(&config.runner);
                if tests.is_empty() {
                    println!("{} No tests found", "✗".red());
                    continue;
                }
                println!("{}", "Available tests:".cyan());
                for (i, test) in tests.iter().enumerate() {
                    println!("  {}. {}", i + 1, test);
                }
            }
            "l" => logs::show_recent(&config.server),
            "r" => {
                server::restart(&config.server);
                println!();
            }
            "s" => {
                teardown::stop_server_once(&config.server);
                println!();
                break;
            }
            "q" => {
                teardown::stop_server_once(&config.server);
                println!();
                return Ok(());
            }
            other => println!("Unknown command: {}", other),
        }
    }

    Ok(())
}

fn print_menu() {
    ui::print_box("Interactive Mode", 62);
    println!("{}", "Commands:".yellow());
    println!("  {} - Run the full test suite", "t".cyan());
    println!("  {} - Run one test (prompts for a pattern)", "o".cyan());
    println!("  {} - List all available tests", "--".cyan());
    println!("  {} - Show recent server logs", "l".cyan());
    println!("  {} - Restart the server", "r".cyan());
    println!("  {} - Stop the server and leave the menu", "s".cyan());
    println!("  {} - Quit", "q".cyan());
    println!();
}

/// EOF reads as quit so the menu never spins on a closed stdin.
fn read_reply(prompt: &str) -> String {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .unwrap_or_else(|_| "q".to_string())
}
