// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The procedure engine itself only knows logical ticks. A [`TickPacer`] turns
//! real elapsed time from a [`Clock`] into the number of ticks the caller still
//! owes the engine, so production loops can catch up after a slow iteration.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Paces logical ticks against a real clock
pub struct TickPacer<C: Clock> {
    clock: C,
    tick: Duration,
    origin: Instant,
    issued: u64,
}

impl<C: Clock> TickPacer<C> {
    /// Create a pacer whose origin is the clock's current time.
    ///
    /// A zero tick length is treated as one millisecond.
    pub fn new(clock: C, tick: Duration) -> Self {
        let tick = if tick.is_zero() {
            Duration::from_millis(1)
        } else {
            tick
        };
        let origin = clock.now();
        Self {
            clock,
            tick,
            origin,
            issued: 0,
        }
    }

    /// Number of ticks elapsed since the last call (or since creation)
    pub fn due(&mut self) -> u64 {
        let elapsed = self.clock.now().saturating_duration_since(self.origin);
        let total = elapsed.as_nanos() / self.tick.as_nanos();
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let due = total.saturating_sub(self.issued);
        self.issued = total;
        due
    }

    /// Total ticks handed out so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
