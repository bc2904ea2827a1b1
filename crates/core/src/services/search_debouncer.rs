use std::time::{Duration, Instant};

/// Delay between the last keystroke and running the search.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Coalesces rapid search-box input into a single query.
///
/// The caller feeds every change with `input` and calls `poll` from its
/// event loop; `poll` hands out the text once the input has been quiet for
/// the debounce delay, and only once per change.
///
/// Meant for front ends that see individual keystrokes. The line-based CLI
/// shell receives whole lines and searches right away.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::with_delay(SEARCH_DEBOUNCE)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record new search text typed at `at`. Restarts the delay.
    pub fn input(&mut self, text: impl Into<String>, at: Instant) {
        self.pending = Some((text.into(), at));
    }

    /// The text to search for, if the delay has elapsed since the last input.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if ready {
            self.pending.take().map(|(text, _)| text)
        } else {
            None
        }
    }

    /// When the pending text becomes ready, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
