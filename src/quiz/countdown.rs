//! Per-question countdown
//!
//! Driven by elapsed time handed in from outside; it never sleeps. A
//! cancelled countdown ignores further time until restarted, so time fed in
//! after a reset cannot expire a question that is no longer on screen.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    limit: Duration,
    elapsed: Duration,
    running: bool,
}

impl Countdown {
    /// Stopped countdown; call `restart` to arm it
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Full time again, running
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    /// Whole seconds left, rounded up (what the HUD shows)
    pub fn remaining_secs(&self) -> u64 {
        let remaining = self.remaining();
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// Advance by `dt`. Returns true exactly once, on the call that reaches
    /// the limit; the countdown then stops.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.limit);
        if self.elapsed >= self.limit {
            self.running = false;
            return true;
        }
        false
    }
}
