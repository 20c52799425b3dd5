// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn owner(id: &str) -> ProcedureId {
    ProcedureId::from(id)
}

fn advance_by(timers: &mut TimerService, ticks: u64) -> Vec<FiredTimer> {
    let mut fired = Vec::new();
    for _ in 0..ticks {
        fired.extend(timers.advance());
    }
    fired
}

#[test]
fn timer_fires_after_exactly_its_delay() {
    let mut timers = TimerService::default();
    let id = timers.schedule(owner("p-1"), Duration::from_millis(10));

    assert!(advance_by(&mut timers, 9).is_empty());
    assert!(timers.is_pending(id));

    let fired = timers.advance();
    assert_eq!(fired, vec![FiredTimer { id, owner: owner("p-1") }]);
    assert!(!timers.is_pending(id));
    assert_eq!(timers.now(), 10);
}

#[test]
fn timer_fires_only_once() {
    let mut timers = TimerService::default();
    timers.schedule(owner("p-1"), Duration::from_millis(2));

    assert_eq!(advance_by(&mut timers, 2).len(), 1);
    assert!(advance_by(&mut timers, 10).is_empty());
}

#[test]
fn cancel_prevents_firing() {
    let mut timers = TimerService::default();
    let id = timers.schedule(owner("p-1"), Duration::from_millis(5));

    assert!(timers.cancel(id));
    assert!(advance_by(&mut timers, 10).is_empty());
    assert_eq!(timers.pending(), 0);
}

#[test]
fn cancel_is_idempotent() {
    let mut timers = TimerService::default();
    let id = timers.schedule(owner("p-1"), Duration::from_millis(1));

    assert!(timers.cancel(id));
    assert!(!timers.cancel(id));
}

#[test]
fn cancel_after_fire_is_a_noop() {
    let mut timers = TimerService::default();
    let id = timers.schedule(owner("p-1"), Duration::from_millis(1));
    assert_eq!(timers.advance().len(), 1);

    assert!(!timers.cancel(id));
}

#[test]
fn equal_expiry_timers_all_fire_in_scheduling_order() {
    let mut timers = TimerService::default();
    let a = timers.schedule(owner("a"), Duration::from_millis(3));
    let b = timers.schedule(owner("b"), Duration::from_millis(3));
    let c = timers.schedule(owner("c"), Duration::from_millis(3));

    let fired = advance_by(&mut timers, 3);
    let ids: Vec<_> = fired.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn multiple_timers_fire_in_expiry_order() {
    let mut timers = TimerService::default();
    timers.schedule(owner("late"), Duration::from_millis(30));
    timers.schedule(owner("early"), Duration::from_millis(10));
    timers.schedule(owner("middle"), Duration::from_millis(20));

    let fired = advance_by(&mut timers, 30);
    let owners: Vec<_> = fired.iter().map(|f| f.owner.0.as_str()).collect();
    assert_eq!(owners, vec!["early", "middle", "late"]);
}

#[parameterized(
    zero = { Duration::ZERO, 1 },
    sub_tick = { Duration::from_micros(10), 1 },
    exact = { Duration::from_millis(7), 7 },
    rounds_up = { Duration::from_micros(7_001), 8 },
    ten_seconds = { Duration::from_secs(10), 10_000 },
)]
fn delay_converts_to_ticks(delay: Duration, expected: u64) {
    let timers = TimerService::default();
    assert_eq!(timers.ticks_for(delay), expected);
}

#[test]
fn zero_delay_still_waits_one_tick() {
    let mut timers = TimerService::default();
    let id = timers.schedule(owner("p-1"), Duration::ZERO);

    assert!(timers.is_pending(id));
    assert_eq!(timers.advance().len(), 1);
}

#[test]
fn custom_tick_length_scales_delays() {
    let mut timers = TimerService::new(Duration::from_millis(10));
    timers.schedule(owner("p-1"), Duration::from_secs(1));

    assert!(advance_by(&mut timers, 99).is_empty());
    assert_eq!(timers.advance().len(), 1);
}

#[test]
fn next_expiry_skips_cancelled_timers() {
    let mut timers = TimerService::default();
    let early = timers.schedule(owner("a"), Duration::from_millis(5));
    timers.schedule(owner("b"), Duration::from_millis(8));

    assert_eq!(timers.next_expiry(), Some(5));
    timers.cancel(early);
    assert_eq!(timers.next_expiry(), Some(8));
}
