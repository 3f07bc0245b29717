//! Bounded display of the server's persisted output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::config::ServerConfig;

/// How much of the log the `l` command shows.
pub const TAIL_LINES: usize = 50;

/// Read the last `n` lines of a file, oldest first.
pub fn tail_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(n);
    Ok(lines[start..].iter().map(|s| s.to_string()).collect())
}

/// Print the recent server log slice, or say where it was expected.
pub fn show_recent(config: &ServerConfig) {
    let path = &config.log_file;
    if !path.exists() {
        println!(
            "{} No server logs found at {}",
            "✗".red(),
            path.display()
        );
        return;
    }

    println!(
        "{} Recent server logs ({})",
        "▤".yellow(),
        chrono::Local::now().format("%H:%M:%S")
    );
    println!();
    match tail_lines(path, TAIL_LINES) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => eprintln!("{} {:#}", "✗".red(), e),
    }
    println!();
    println!(
        "{} Follow live logs with: tail -f {}",
        "•".cyan(),
        path.display()
    );
}
