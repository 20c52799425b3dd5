// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ngp_core::fixtures;
use ngp_core::{NgSetup, Outcome, ProcedureRequest, RanConfigUpdate, TimeToWait};
use yare::parameterized;

fn setup_task() -> (RetryTask<NgSetup>, ProcedureHandle<NgSetupOutcome>) {
    RetryTask::new(RetryProcedure::new(
        ProcedureId::from("setup-1"),
        ProcedureRequest::new(EntityId::new("amf-1"), fixtures::ng_setup_request(), 1),
    ))
}

#[test]
fn retry_task_publishes_outcome_to_handle() {
    let (mut task, handle) = setup_task();

    task.resume(Wake::Launch);
    assert!(!handle.ready());

    task.resume(Wake::Message(fixtures::ng_setup_response()));
    assert!(handle.ready());
    assert!(handle.get().is_success());
}

#[test]
fn retry_task_ignores_foreign_replies() {
    let (mut task, handle) = setup_task();
    task.resume(Wake::Launch);

    assert!(!task.accepts(&fixtures::ran_configuration_update_ack()));
    let effects = task.resume(Wake::Message(fixtures::ran_configuration_update_ack()));

    assert!(effects.is_empty());
    assert_eq!(task.waiting_for(), WaitingFor::Response);
    assert!(!handle.ready());
}

#[test]
fn retry_task_reports_its_kind() {
    let (task, _) = setup_task();
    assert_eq!(task.kind(), "ng_setup");

    let (update, _) = RetryTask::<RanConfigUpdate>::new(RetryProcedure::new(
        ProcedureId::from("update-1"),
        ProcedureRequest::new(
            EntityId::new("amf-1"),
            fixtures::ran_configuration_update(),
            0,
        ),
    ));
    assert_eq!(update.kind(), "ran_configuration_update");
}

#[parameterized(
    launch_when_created = { false, Wake::Launch, true },
    timer_when_created = { false, Wake::TimerFired, false },
    cancel_when_created = { false, Wake::Cancel, true },
    reply_when_awaiting = { true, Wake::Message(fixtures::ng_setup_response()), true },
    foreign_when_awaiting = { true, Wake::Message(fixtures::ran_configuration_update_ack()), false },
    timer_when_awaiting = { true, Wake::TimerFired, false },
    launch_when_awaiting = { true, Wake::Launch, false },
    child_when_awaiting = { true, Wake::ProcedureDone(ProcedureId::from("x")), false },
)]
fn retry_task_expects_only_matching_wakes(launched: bool, wake: Wake, expected: bool) {
    let (mut task, _) = setup_task();
    if launched {
        task.resume(Wake::Launch);
    }
    assert_eq!(task.expects(&wake), expected);
}

#[test]
fn backoff_task_expects_timer() {
    let (mut task, _) = setup_task();
    task.resume(Wake::Launch);
    task.resume(Wake::Message(fixtures::ng_setup_failure_with_time_to_wait(
        TimeToWait::V2s,
    )));

    assert!(task.expects(&Wake::TimerFired));
    assert!(!task.expects(&Wake::Message(fixtures::ng_setup_response())));
}

#[test]
fn terminal_task_expects_nothing() {
    let (mut task, handle) = setup_task();
    task.resume(Wake::Launch);
    task.resume(Wake::Cancel);

    assert!(task.is_cancelled());
    assert!(handle.is_cancelled());
    assert!(!task.expects(&Wake::Cancel));
    assert!(!task.expects(&Wake::Launch));
}

#[test]
fn connection_task_reads_setup_result_when_woken() {
    let (mut setup, setup_handle) = setup_task();
    let (mut connection, handle) = ConnectionTask::new(
        AmfConnection::new(
            ProcedureId::from("conn-1"),
            EntityId::new("ngc"),
            EntityId::new("amf-1"),
            ProcedureId::from("setup-1"),
        ),
        setup_handle,
    );

    setup.resume(Wake::Launch);
    connection.resume(Wake::Launch);
    assert!(connection.expects(&Wake::ProcedureDone(ProcedureId::from("setup-1"))));
    assert!(!connection.expects(&Wake::ProcedureDone(ProcedureId::from("other"))));
    assert_eq!(connection.kind(), "amf_connection");

    setup.resume(Wake::Message(fixtures::ng_setup_response()));
    connection.resume(Wake::ProcedureDone(ProcedureId::from("setup-1")));

    assert_eq!(
        handle.get(),
        &Outcome::Success(fixtures::AMF_NAME.to_string())
    );
}

#[test]
fn connection_task_never_accepts_messages() {
    let (_, setup_handle) = setup_task();
    let (connection, _) = ConnectionTask::new(
        AmfConnection::new(
            ProcedureId::from("conn-1"),
            EntityId::new("ngc"),
            EntityId::new("amf-1"),
            ProcedureId::from("setup-1"),
        ),
        setup_handle,
    );
    assert!(!connection.accepts(&fixtures::ng_setup_response()));
}

#[test]
fn wake_names() {
    assert_eq!(Wake::Launch.name(), "launch");
    assert_eq!(Wake::TimerFired.name(), "timer");
    assert_eq!(Wake::Cancel.name(), "cancel");
}
