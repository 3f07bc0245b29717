//! Single-test execution via the external runner.
//!
//! The engine only ever sees the [`TestRunner`] trait; the shell wires in
//! [`ShellRunner`], tests wire in fakes.

use colored::Colorize;

use crate::catalog::TestId;
use crate::command;
use crate::config::RunnerConfig;
use crate::ui;

/// Result of one test execution. Ephemeral: produced here, consumed
/// immediately by the engine, never persisted.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub test: TestId,
    pub passed: bool,
}

/// Seam between the iteration engine and the external test runner.
pub trait TestRunner {
    fn run(&mut self, test: &TestId) -> RunOutcome;
}

/// Runs one test through the configured run-command template with
/// inherited stdio, so assertion detail streams to the terminal while only
/// pass/fail crosses back.
pub struct ShellRunner<'a> {
    config: &'a RunnerConfig,
}

impl<'a> ShellRunner<'a> {
    pub fn new(config: &'a RunnerConfig) -> Self {
        Self { config }
    }
}

impl TestRunner for ShellRunner<'_> {
    fn run(&mut self, test: &TestId) -> RunOutcome {
        println!("{}", ui::format::separator(60).blue());
        println!("  {} {}", "Running:".bold(), test.as_str().cyan());
        println!("{}", ui::format::separator(60).blue());
        println!();

        let cmd = self.config.run_command.replace("{test}", test.as_str());
        // A runner that cannot even be invoked counts as a failure; the
        // operator retries after fixing their environment.
        let passed = command::sh_status(&cmd)
            .map(|status| status.success())
            .unwrap_or(false);
        println!();

        if passed {
            println!("{} - {}", "PASSED".green().bold(), test.as_str().cyan());
        } else {
            println!("{} - {}", "FAILED".red().bold(), test.as_str().cyan());
            println!();
            println!(
                "{}",
                "Fix the issue, then press Enter to retry".yellow()
            );
        }

        RunOutcome {
            test: test.clone(),
            passed,
        }
    }
}
