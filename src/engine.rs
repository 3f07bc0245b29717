//! The test-iteration state machine.
//!
//! A [`Session`] owns the immutable test queue and the cursor. The shell
//! feeds it one [`Command`] at a time; every transition comes back as a
//! [`Step`] so the presentation layer decides what to print and the engine
//! stays total over its inputs - no error type ever crosses into it.
//!
//! Cursor invariant: `0 <= position <= total`, where `position == total`
//! is the terminal all-done state. A failing run never advances the
//! cursor; that is the retry-until-green contract.

use anyhow::{bail, Result};

use crate::catalog::TestId;
use crate::runner::TestRunner;

/// One operator command, already read from the terminal.
///
/// `Jump` carries the raw prompt reply; target validation belongs to the
/// engine so invalid input cannot corrupt the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the current test (the default for empty input).
    Run,
    /// Advance past the current test without executing it.
    Skip,
    /// Show recent server logs; consumes no advance.
    Logs,
    /// Move the cursor to a 1-based target index.
    Jump(String),
    /// Stop the server and end the session immediately.
    Quit,
    /// Anything unrecognized; consumes no advance.
    Unknown(String),
}

impl Command {
    /// Map a single-character menu reply to a command. Empty input runs
    /// the current test. `j` parses to a `Jump` with an empty target; the
    /// shell prompts for the target and fills it in (an unfilled target is
    /// rejected as invalid input, never a crash).
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "" | "r" => Command::Run,
            "s" => Command::Skip,
            "l" => Command::Logs,
            "j" => Command::Jump(String::new()),
            "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// What one applied command did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved forward by one (test passed, or skipped).
    Advanced,
    /// The current test ran and failed; cursor unchanged.
    Failed,
    /// The shell should display recent server logs; cursor unchanged.
    ShowLogs,
    /// Valid jump; cursor now at the contained 0-based index.
    Jumped(usize),
    /// Jump target was out of range or not a number; cursor unchanged.
    InvalidJump,
    /// Operator quit; terminal, bypasses normal exhaustion.
    Quit,
    /// Unrecognized command; cursor unchanged.
    Unknown,
}

/// One TDD session: the ordered queue discovered at entry plus the cursor.
///
/// The queue is immutable for the life of the session; tests added or
/// removed externally are not reflected until the next session.
pub struct Session {
    queue: Vec<TestId>,
    position: usize,
}

impl Session {
    /// Create a session over a discovered queue.
    ///
    /// An empty queue is a fatal precondition. A non-empty `filter` picks
    /// the first test whose identifier contains it (case-insensitive);
    /// no match silently starts at the beginning.
    pub fn new(queue: Vec<TestId>, filter: &str) -> Result<Self> {
        if queue.is_empty() {
            bail!("No tests found");
        }
        let position = start_index(&queue, filter);
        Ok(Self { queue, position })
    }

    pub fn current(&self) -> Option<&TestId> {
        self.queue.get(self.position)
    }

    /// 0-based cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.queue.len()
    }

    /// Tests after the current one; zero once the session is done.
    pub fn remaining(&self) -> usize {
        self.total().saturating_sub(self.position + 1)
    }

    /// All tests exhausted without an explicit quit.
    pub fn is_done(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Apply one command.
    ///
    /// The runner is only invoked for `Run`, and only its pass/fail bit is
    /// interpreted. Every other command is resolved without external I/O.
    pub fn apply(&mut self, command: Command, runner: &mut dyn TestRunner) -> Step {
        match command {
            Command::Run => {
                let current = match self.current() {
                    Some(test) => test.clone(),
                    None => return Step::Unknown,
                };
                if runner.run(&current).passed {
                    self.position += 1;
                    Step::Advanced
                } else {
                    Step::Failed
                }
            }
            Command::Skip => {
                if self.is_done() {
                    return Step::Unknown;
                }
                self.position += 1;
                Step::Advanced
            }
            Command::Logs => Step::ShowLogs,
            Command::Jump(raw) => match parse_jump_target(&raw, self.total()) {
                Some(index) => {
                    self.position = index;
                    Step::Jumped(index)
                }
                None => Step::InvalidJump,
            },
            Command::Quit => Step::Quit,
            Command::Unknown(_) => Step::Unknown,
        }
    }
}

/// First index whose identifier contains the filter, else 0.
fn start_index(queue: &[TestId], filter: &str) -> usize {
    if filter.is_empty() {
        return 0;
    }
    queue
        .iter()
        .position(|test| test.matches(filter))
        .unwrap_or(0)
}

/// Parse a 1-based jump reply into a 0-based index.
///
/// Valid targets are `1..=total`; `total + 1` is the already-exhausted
/// boundary and is rejected like any other out-of-range input.
fn parse_jump_target(raw: &str, total: usize) -> Option<usize> {
    let target: usize = raw.trim().parse().ok()?;
    if (1..=total).contains(&target) {
        Some(target - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunOutcome;

    /// Scripted runner: pops one pass/fail per invocation and records which
    /// tests were executed.
    struct FakeRunner {
        script: Vec<bool>,
        executed: Vec<TestId>,
    }

    impl FakeRunner {
        fn new(script: &[bool]) -> Self {
            Self {
                script: script.iter().rev().copied().collect(),
                executed: Vec::new(),
            }
        }

        fn runs_of(&self, id: &str) -> usize {
            self.executed
                .iter()
                .filter(|t| t.as_str() == id)
                .count()
        }
    }

    impl TestRunner for FakeRunner {
        fn run(&mut self, test: &TestId) -> RunOutcome {
            self.executed.push(test.clone());
            RunOutcome {
                test: test.clone(),
                passed: self.script.pop().unwrap_or(true),
            }
        }
    }

    fn queue(ids: &[&str]) -> Vec<TestId> {
        ids.iter().copied().map(TestId::new).collect()
    }

    #[test]
    fn empty_queue_is_fatal() {
        assert!(Session::new(Vec::new(), "").is_err());
    }

    #[test]
    fn filter_picks_first_matching_test() {
        let session =
            Session::new(queue(&["login", "room-create", "room-join"]), "room").unwrap();
        assert_eq!(session.position(), 1);
        assert_eq!(session.current().unwrap().as_str(), "room-create");
    }

    #[test]
    fn unmatched_filter_defaults_to_start() {
        let session =
            Session::new(queue(&["login", "room-create", "room-join"]), "zzz").unwrap();
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn passing_run_advances_by_one() {
        let mut session = Session::new(queue(&["a", "b"]), "").unwrap();
        let mut runner = FakeRunner::new(&[true]);

        assert_eq!(session.apply(Command::Run, &mut runner), Step::Advanced);
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn failing_run_never_moves_the_cursor() {
        let mut session = Session::new(queue(&["a", "b"]), "").unwrap();
        let mut runner = FakeRunner::new(&[false, false, true]);

        assert_eq!(session.apply(Command::Run, &mut runner), Step::Failed);
        assert_eq!(session.position(), 0);
        assert_eq!(session.apply(Command::Run, &mut runner), Step::Failed);
        assert_eq!(session.position(), 0);

        // Fix lands, retry passes, exactly one advance.
        assert_eq!(session.apply(Command::Run, &mut runner), Step::Advanced);
        assert_eq!(session.position(), 1);
        assert_eq!(runner.runs_of("a"), 3);
    }

    #[test]
    fn skip_advances_without_executing() {
        let mut session = Session::new(queue(&["a", "b"]), "").unwrap();
        let mut runner = FakeRunner::new(&[]);

        assert_eq!(session.apply(Command::Skip, &mut runner), Step::Advanced);
        assert_eq!(session.position(), 1);
        assert!(runner.executed.is_empty());
    }

    #[test]
    fn session_done_after_exactly_n_advancing_commands() {
        let mut session = Session::new(queue(&["a", "b", "c", "d"]), "").unwrap();
        let mut runner = FakeRunner::new(&[true, true]);

        // Interleave non-advancing commands; they must consume no advances.
        let script = [
            Command::Logs,
            Command::Run,
            Command::Unknown("x".to_string()),
            Command::Skip,
            Command::Jump("banana".to_string()),
            Command::Run,
            Command::Logs,
            Command::Skip,
        ];

        let mut advances = 0;
        for command in script {
            if session.apply(command, &mut runner) == Step::Advanced {
                advances += 1;
            }
        }

        assert_eq!(advances, 4);
        assert!(session.is_done());
    }

    #[test]
    fn jump_is_one_based_and_unrestricted() {
        let mut session = Session::new(queue(&["a", "b", "c"]), "").unwrap();
        let mut runner = FakeRunner::new(&[]);

        assert_eq!(
            session.apply(Command::Jump("3".to_string()), &mut runner),
            Step::Jumped(2)
        );
        assert_eq!(session.current().unwrap().as_str(), "c");

        // Backward jump revisits an earlier test.
        assert_eq!(
            session.apply(Command::Jump("1".to_string()), &mut runner),
            Step::Jumped(0)
        );
        assert_eq!(session.current().unwrap().as_str(), "a");
    }

    #[test]
    fn invalid_jump_targets_leave_cursor_unchanged() {
        let mut session = Session::new(queue(&["a", "b", "c"]), "").unwrap();
        let mut runner = FakeRunner::new(&[]);
        session.apply(Command::Skip, &mut runner);
        assert_eq!(session.position(), 1);

        for raw in ["0", "4", "nope", "", "-1", "1.5"] {
            assert_eq!(
                session.apply(Command::Jump(raw.to_string()), &mut runner),
                Step::InvalidJump,
                "jump target {:?} should be invalid",
                raw
            );
            assert_eq!(session.position(), 1);
        }
    }

    #[test]
    fn jump_to_done_boundary_is_invalid() {
        let mut session = Session::new(queue(&["a", "b"]), "").unwrap();
        let mut runner = FakeRunner::new(&[]);

        // total + 1 is the exhausted boundary, not a valid skip-to-end.
        assert_eq!(
            session.apply(Command::Jump("3".to_string()), &mut runner),
            Step::InvalidJump
        );
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn quit_is_terminal_at_any_position() {
        let mut session = Session::new(queue(&["a", "b", "c"]), "").unwrap();
        let mut runner = FakeRunner::new(&[]);

        assert_eq!(session.apply(Command::Quit, &mut runner), Step::Quit);
        assert!(!session.is_done());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn end_to_end_fail_retry_skip() {
        let mut session = Session::new(queue(&["a", "b"]), "").unwrap();
        let mut runner = FakeRunner::new(&[false, true]);

        assert_eq!(session.apply(Command::Run, &mut runner), Step::Failed);
        assert_eq!(session.apply(Command::Run, &mut runner), Step::Advanced);
        assert_eq!(session.apply(Command::Skip, &mut runner), Step::Advanced);

        assert!(session.is_done());
        assert_eq!(session.remaining(), 0);
        assert_eq!(runner.runs_of("a"), 2);
        assert_eq!(runner.runs_of("b"), 0);
    }

    #[test]
    fn command_parsing_defaults_empty_input_to_run() {
        assert_eq!(Command::parse(""), Command::Run);
        assert_eq!(Command::parse("  "), Command::Run);
        assert_eq!(Command::parse("r"), Command::Run);
        assert_eq!(Command::parse("R"), Command::Run);
        assert_eq!(Command::parse("s"), Command::Skip);
        assert_eq!(Command::parse("l"), Command::Logs);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("j"), Command::Jump(String::new()));
        assert_eq!(
            Command::parse("help"),
            Command::Unknown("help".to_string())
        );
    }
}
