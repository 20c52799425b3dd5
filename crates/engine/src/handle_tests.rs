// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

type TestOutcome = Outcome<String, String>;

fn make_handle() -> (ResultSlot<TestOutcome>, ProcedureHandle<TestOutcome>) {
    let slot: ResultSlot<TestOutcome> = Rc::new(OnceCell::new());
    let handle = ProcedureHandle::new(ProcedureId::from("proc-1"), Rc::clone(&slot));
    (slot, handle)
}

#[test]
fn handle_is_not_ready_until_written() {
    let (_slot, handle) = make_handle();

    assert_eq!(handle.id(), &ProcedureId::from("proc-1"));
    assert!(!handle.ready());
    assert!(handle.try_get().is_none());
    assert!(!handle.is_cancelled());
}

#[test]
fn clones_observe_the_same_result() {
    let (slot, handle) = make_handle();
    let other = handle.clone();

    slot.set(Outcome::Success("open5gs-amf0".to_string())).unwrap();

    assert!(handle.ready());
    assert!(other.ready());
    assert_eq!(
        other.get(),
        &Outcome::Success("open5gs-amf0".to_string())
    );
}

#[test]
fn result_is_written_once() {
    let (slot, handle) = make_handle();

    slot.set(Outcome::Cancelled).unwrap();
    assert!(slot.set(Outcome::Failure("late".to_string())).is_err());

    assert!(handle.is_cancelled());
    assert_eq!(handle.get(), &Outcome::Cancelled);
}

#[test]
#[should_panic(expected = "read before it was ready")]
fn get_before_ready_panics() {
    let (_slot, handle) = make_handle();
    let _ = handle.get();
}

#[test]
fn debug_shows_id_and_result() {
    let (_slot, handle) = make_handle();
    let debug = format!("{:?}", handle);
    assert!(debug.contains("proc-1"));
    assert!(debug.contains("None"));
}
