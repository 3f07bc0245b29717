//! Test discovery from the external runner's list-only mode.

use std::fmt;

use crate::command;
use crate::config::RunnerConfig;

/// Opaque identifier (or pattern) for one test case, as reported by the
/// external runner. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestId(String);

impl TestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match, as used by the starting filter.
    pub fn matches(&self, filter: &str) -> bool {
        self.0.to_lowercase().contains(&filter.to_lowercase())
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discover the ordered list of available tests.
///
/// Returns an empty vec when the list command fails or produces no usable
/// output; callers treat an empty catalog as a fatal precondition for TDD
/// mode rather than an error here.
pub fn list_tests(config: &RunnerConfig) -> Vec<TestId> {
    match command::sh(&config.list_command) {
        Ok(output) => parse_test_list(
            &String::from_utf8_lossy(&output.stdout),
            &config.list_summary_prefix,
        ),
        Err(_) => Vec::new(),
    }
}

/// One TestId per line, in runner-reported order. Blank lines and summary
/// lines are discarded; duplicates are preserved.
pub fn parse_test_list(stdout: &str, summary_prefix: &str) -> Vec<TestId> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| summary_prefix.is_empty() || !line.starts_with(summary_prefix))
        .map(TestId::new)
        .collect()
}
