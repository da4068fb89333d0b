//! Trailing-edge debounce timer.
//!
//! Time is passed in by the caller, so the host decides what a clock is and
//! tests can step through a quiet period without sleeping.

use std::time::{Duration, Instant};

/// Fires once, `quiet` after the most recent trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an event at `now`, pushing the deadline out.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
