//! Logical timers driven by the host's tick events.
//!
//! Nothing here sleeps or spawns: the owner feeds elapsed time through
//! `advance` and reacts to the return value. A timer that is dropped or
//! cancelled simply never fires.

use std::time::Duration;

/// A cancellable one-shot delay.
///
/// Scheduling while a delay is pending replaces it, so at most one expiry is
/// ever outstanding per `Delay`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delay {
    remaining: Option<Duration>,
}

impl Delay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, after: Duration) {
        self.cancel();
        self.remaining = Some(after);
    }

    /// Returns true if a pending expiry was dropped
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Moves the delay forward; true exactly once, on the call that expires it
    pub fn advance(&mut self, elapsed: Duration) -> bool {
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
}

/// Counts down whole units (seconds for the speed round).
///
/// Sub-unit remainders carry over between calls so a 100ms tick loop
/// consumes one unit every ten ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    unit: Duration,
    carry: Duration,
}

impl Countdown {
    pub fn new(units: u32, unit: Duration) -> Self {
        Self {
            remaining: units,
            unit,
            carry: Duration::ZERO,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Returns how many whole units elapsed during this call
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.is_expired() || self.unit.is_zero() {
            return 0;
        }
        self.carry += elapsed;
        let mut consumed = 0;
        while self.carry >= self.unit && self.remaining > 0 {
            self.carry -= self.unit;
            self.remaining -= 1;
            consumed += 1;
        }
        consumed
    }
}
