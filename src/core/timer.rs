//! Millisecond clocks advanced by the caller.
//!
//! The session owns two independent [`Interval`]s (physics tick and obstacle
//! spawn) and one [`Countdown`] for the death animation. Time only moves when
//! the owner calls `advance`, which keeps runs deterministic under test.

/// A repeating timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    elapsed_ms: u64,
    active: bool,
}

impl Interval {
    /// Create a stopped interval. A zero period is bumped to 1ms.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            active: false,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Start (or restart) with a fresh period.
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.elapsed_ms = 0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Milliseconds until the next firing, or `None` when stopped.
    pub fn until_next(&self) -> Option<u64> {
        self.active.then(|| self.period_ms - self.elapsed_ms)
    }

    /// Move the clock forward by `ms`, which must not exceed `until_next()`.
    /// Returns true when the period completes.
    pub fn advance(&mut self, ms: u64) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed_ms += ms;
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            true
        } else {
            false
        }
    }
}

/// A one-shot timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: Option<u64>,
}

impl Countdown {
    pub fn arm(&mut self, ms: u64) {
        self.remaining_ms = Some(ms);
    }

    pub fn disarm(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn until_done(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Returns true exactly once, on the call that exhausts the countdown.
    pub fn advance(&mut self, ms: u64) -> bool {
        match self.remaining_ms {
            Some(remaining) if ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - ms);
                false
            }
            None => false,
        }
    }
}
