//! Timer primitives shared by every engine.
//!
//! Engines never read the wall clock. The runtime (or a test) tells them how
//! much time has passed through [`TimeStep::advance`], and they use
//! [`Periodic`] and [`Deferred`] to decide which effects fall inside that
//! window.

use std::time::Duration;

/// Anything that moves forward on the shared logical timeline.
pub trait TimeStep {
    fn advance(&mut self, elapsed: Duration);
}

/// Repeating timer. Fires once per full `interval` of accumulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic {
    interval: Duration,
    accumulated: Duration,
}

impl Periodic {
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "periodic interval must be non-zero");
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next firing.
    pub fn until_due(&self) -> Duration {
        self.interval - self.accumulated
    }

    /// Adds `elapsed` and returns how many times the timer fired.
    pub fn elapse(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Drops any partial progress towards the next firing.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

/// One-shot timer that can be cancelled before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    remaining: Option<Duration>,
}

impl Deferred {
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: Some(delay),
        }
    }

    /// A timer that has nothing scheduled.
    pub fn idle() -> Self {
        Self { remaining: None }
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Returns true exactly once: on the call where the delay runs out.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(left) if elapsed >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - elapsed);
                false
            }
            None => false,
        }
    }

    /// Fires immediately if pending. Used to bypass presentation delays.
    pub fn fire_now(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }
}

impl Default for Deferred {
    fn default() -> Self {
        Self::idle()
    }
}
