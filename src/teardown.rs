//! One idempotent shutdown path for every way a session can end.
//!
//! Interrupt, operator quit, and normal exhaustion all converge here, and
//! the stop action runs at most once no matter how many paths reach it.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

use crate::config::ServerConfig;
use crate::server;

static STOPPED: AtomicBool = AtomicBool::new(false);

/// Atomically claim the one-shot stop action. Only the first caller wins.
fn claim() -> bool {
    !STOPPED.swap(true, Ordering::SeqCst)
}

/// Stop the server exactly once across all exit paths.
pub fn stop_server_once(config: &ServerConfig) {
    if !claim() {
        return;
    }
    println!("{} Stopping server...", "⏹".yellow());
    server::stop(config);
    println!("{} Server stopped", "✓".green());
}

/// Register the interrupt handler. SIGINT/SIGTERM stop the server through
/// the same one-shot action, then exit with the conventional 130.
pub fn install_interrupt_handler(config: &ServerConfig) {
    let config = config.clone();
    let _ = ctrlc::set_handler(move || {
        eprintln!();
        stop_server_once(&config);
        std::process::exit(130);
    });
}
