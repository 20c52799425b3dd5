// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical-time timer service
//!
//! Timers are measured in ticks of a fixed length and only move when
//! [`TimerService::advance`] is called, so tests can step time one unit at a
//! time without touching the wall clock.

use crate::id::ProcedureId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Default tick length
pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

/// Handle of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// A timer that reached its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub owner: ProcedureId,
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    id: TimerId,
    owner: ProcedureId,
    fire_at: u64,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.id == other.id
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, ties in scheduling order
        Reverse((self.fire_at, self.id)).cmp(&Reverse((other.fire_at, other.id)))
    }
}

/// One-shot timers driven by an external tick source
#[derive(Debug)]
pub struct TimerService {
    tick: Duration,
    now: u64,
    next_id: u64,
    items: BinaryHeap<ScheduledTimer>,
    live: HashSet<TimerId>,
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl TimerService {
    /// Create a service with the given tick length (zero falls back to the default)
    pub fn new(tick: Duration) -> Self {
        Self {
            tick: if tick.is_zero() { DEFAULT_TICK } else { tick },
            now: 0,
            next_id: 1,
            items: BinaryHeap::new(),
            live: HashSet::new(),
        }
    }

    /// Convert a delay to whole ticks, rounding up; never less than one tick
    pub fn ticks_for(&self, delay: Duration) -> u64 {
        let tick = self.tick.as_nanos();
        let ticks = delay.as_nanos().div_ceil(tick);
        u64::try_from(ticks).unwrap_or(u64::MAX).max(1)
    }

    /// Schedule a one-shot timer owned by `owner`
    pub fn schedule(&mut self, owner: ProcedureId, delay: Duration) -> TimerId {
        let ticks = self.ticks_for(delay);
        self.schedule_ticks(owner, ticks)
    }

    /// Schedule a one-shot timer that fires after exactly `ticks` advances
    pub fn schedule_ticks(&mut self, owner: ProcedureId, ticks: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let fire_at = self.now.saturating_add(ticks.max(1));
        tracing::trace!(%id, %owner, fire_at, "timer scheduled");
        self.items.push(ScheduledTimer { id, owner, fire_at });
        self.live.insert(id);
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id)
    }

    /// Advance logical time by one tick and collect expired timers
    pub fn advance(&mut self) -> Vec<FiredTimer> {
        self.now += 1;
        let mut fired = Vec::new();

        while let Some(item) = self.items.peek() {
            if item.fire_at > self.now {
                break;
            }

            let Some(item) = self.items.pop() else {
                break;
            };

            // Skip cancelled timers
            if !self.live.remove(&item.id) {
                continue;
            }

            fired.push(FiredTimer {
                id: item.id,
                owner: item.owner,
            });
        }

        fired
    }

    /// Ticks elapsed since the service was created
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Whether the timer is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    /// Number of timers waiting to fire
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Tick at which the next live timer fires
    pub fn next_expiry(&self) -> Option<u64> {
        self.items
            .iter()
            .filter(|item| self.live.contains(&item.id))
            .map(|item| item.fire_at)
            .min()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
