//! # Greenloop - fix-until-green test iteration
//!
//! Greenloop drives an integration test suite one test at a time against a
//! locally managed dev server, supporting a retry-until-green TDD loop.
//!
//! ## Core Concepts
//!
//! - **Session**: the ordered test queue plus a cursor, advanced only by
//!   operator commands (run-pass, skip, jump)
//! - **Server lifecycle**: idempotent start with a bounded readiness wait,
//!   best-effort stop shared by every exit path
//! - **External runner**: an opaque test command invoked per test; only the
//!   exit status crosses the boundary
//!
//! ## Modules
//!
//! - [`engine`] - The iteration state machine (session, commands, steps)
//! - [`catalog`] - Test discovery from the runner's list-only mode
//! - [`runner`] - Single-test execution behind the [`runner::TestRunner`] trait
//! - [`server`] - Dev-server lifecycle (start/stop/restart)
//! - [`probe`] - Liveness probes for the server and the conflicting service
//! - [`config`] - Project configuration (commands, endpoints, budgets)
//! - [`poll`] - Bounded retry combinator used by readiness waits
//! - [`teardown`] - Idempotent shutdown shared by quit, exhaustion, interrupt
//!
//! ## Example
//!
//! ```no_run
//! use greenloop::catalog::TestId;
//! use greenloop::engine::{Command, Session, Step};
//! # struct NeverRun;
//! # impl greenloop::runner::TestRunner for NeverRun {
//! #     fn run(
//! #         &mut self,
//! #         test: &greenloop::catalog::TestId,
//! #     ) -> greenloop::runner::RunOutcome {
//! #         greenloop::runner::RunOutcome { test: test.clone(), passed: true }
//! #     }
//! # }
//!
//! let queue = vec![TestId::new("login"), TestId::new("room-create")];
//! let mut session = Session::new(queue, "").expect("non-empty queue");
//! let mut runner = NeverRun;
//!
//! match session.apply(Command::Skip, &mut runner) {
//!     Step::Advanced => assert_eq!(session.position(), 1),
//!     _ => unreachable!(),
//! }
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod engine;
pub mod logs;
pub mod poll;
pub mod probe;
pub mod runner;
pub mod server;
pub mod teardown;
pub mod ui;

/// Default path constants for greenloop.
pub mod paths {
    /// Project configuration file, searched for upward from the cwd.
    pub const PROJECT_CONFIG: &str = ".greenloop.yaml";
    /// Fallback server log path when no config overrides it.
    pub const DEFAULT_LOG_FILE: &str = "/tmp/greenloop-server.log";
}
