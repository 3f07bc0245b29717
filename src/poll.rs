//! Bounded retry combinator.
//!
//! A poll loop with a fixed attempt count and fixed interval, never
//! indefinite. Used by the server readiness wait; any future bounded
//! readiness check should reuse it rather than hand-rolling a loop.

use std::thread;
use std::time::Duration;

/// Poll `predicate` up to `max_attempts` times, sleeping `interval` between
/// attempts. Returns `true` on the first attempt where the predicate holds,
/// `false` once the budget is exhausted.
///
/// The predicate is invoked exactly once per attempt; no sleep follows the
/// final attempt.
pub fn wait_for(max_attempts: usize, interval: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    for attempt in 0..max_attempts {
        if predicate() {
            return true;
        }
        if attempt + 1 < max_attempts {
            thread::sleep(interval);
        }
    }
    false
}
