//! Debounced commit of search input.
//!
//! # Responsibility
//! - Hold the latest typed value until a quiet interval elapses, then yield
//!   it exactly once for the caller to commit to the filter state.
//!
//! # Invariants
//! - Each new input re-arms the deadline and invalidates any prior pending
//!   commit; an invalidated commit can never fire.
//! - Intermediate values typed during active input are never yielded.

use std::time::{Duration, Instant};

/// Quiet interval after the last keystroke before the value commits.
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct PendingCommit {
    value: String,
    deadline: Instant,
}

/// Cancellable deferred commit for type-as-you-search input.
///
/// Time is passed in explicitly (`now: Instant`), so hosts drive it from
/// their event loop and tests use synthetic instants.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<PendingCommit>,
    token: u64,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            token: 0,
        }
    }

    /// Records a keystroke's resulting value and re-arms the quiet timer.
    ///
    /// Returns the monotonic token identifying this pending commit; any
    /// previously pending commit is superseded and will never fire.
    pub fn note_input(&mut self, value: impl Into<String>, now: Instant) -> u64 {
        self.token += 1;
        self.pending = Some(PendingCommit {
            value: value.into(),
            deadline: now + self.quiet,
        });
        self.token
    }

    /// Yields the settled value once the quiet interval has elapsed.
    ///
    /// Returns `Some` at most once per armed commit; the pending state is
    /// cleared on yield.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.deadline <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops any pending commit outright; the timer never fires.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending commit, for host wake-up scheduling.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the most recently armed commit, 0 before any input.
    pub fn last_token(&self) -> u64 {
        self.token
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchDebouncer;
    use std::time::{Duration, Instant};

    #[test]
    fn keystroke_rearms_the_deadline() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(10));
        let base = Instant::now();

        debouncer.note_input("a", base);
        assert_eq!(debouncer.deadline(), Some(base + Duration::from_millis(10)));

        debouncer.note_input("ab", base + Duration::from_millis(5));
        assert_eq!(debouncer.deadline(), Some(base + Duration::from_millis(15)));
    }

    #[test]
    fn cancel_drops_the_pending_commit() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(10));
        let base = Instant::now();

        debouncer.note_input("abc", base);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(base + Duration::from_millis(20)), None);
    }
}
