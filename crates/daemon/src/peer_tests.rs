// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ngp_core::fixtures;
use ngp_core::EntityId;
use tokio::sync::mpsc;

fn setup_request() -> PeerMessage {
    PeerMessage::new(
        EntityId::new("amf-1"),
        Pdu::NgSetupRequest(fixtures::ng_setup_request()),
    )
}

fn script(reject_count: u32, time_to_wait: Option<TimeToWait>) -> PeerScript {
    PeerScript {
        reject_count,
        time_to_wait,
        ..PeerScript::default()
    }
}

#[test]
fn accepts_immediately_by_default() {
    let mut amf = SimulatedAmf::new(PeerScript::default());

    let reply = amf.respond(setup_request()).unwrap();

    assert_eq!(reply.entity, EntityId::new("amf-1"));
    match reply.pdu {
        Pdu::NgSetupResponse(response) => {
            assert_eq!(response.amf_name, "open5gs-amf0");
            assert_eq!(response.relative_amf_capacity, 255);
        }
        other => panic!("expected setup response, got {:?}", other),
    }
}

#[test]
fn rejects_scripted_number_of_times() {
    let mut amf = SimulatedAmf::new(script(2, Some(TimeToWait::V1s)));

    for _ in 0..2 {
        let reply = amf.respond(setup_request()).unwrap();
        assert_eq!(
            reply.pdu,
            Pdu::NgSetupFailure(NgSetupFailure {
                cause: Cause::Misc("unspecified".to_string()),
                time_to_wait: Some(TimeToWait::V1s),
            })
        );
    }
    assert_eq!(amf.rejected(), 2);

    let reply = amf.respond(setup_request()).unwrap();
    assert!(matches!(reply.pdu, Pdu::NgSetupResponse(_)));
}

#[test]
fn acknowledges_configuration_updates() {
    let mut amf = SimulatedAmf::new(script(5, None));

    let reply = amf
        .respond(PeerMessage::new(
            EntityId::new("amf-1"),
            Pdu::RanConfigurationUpdate(fixtures::ran_configuration_update()),
        ))
        .unwrap();

    assert_eq!(reply.pdu, fixtures::ran_configuration_update_ack());
    assert_eq!(amf.rejected(), 0);
}

#[test]
fn answers_unexpected_pdus_with_error_indication() {
    let mut amf = SimulatedAmf::new(PeerScript::default());
    let reply = amf
        .respond(PeerMessage::new(
            EntityId::new("amf-1"),
            fixtures::ng_setup_response(),
        ))
        .unwrap();

    assert_eq!(reply.entity, EntityId::new("amf-1"));
    assert_eq!(
        reply.pdu,
        Pdu::ErrorIndication {
            cause: Cause::Protocol("message-not-compatible-with-receiver-state".to_string()),
        }
    );
}

#[test]
fn error_indications_get_no_reply() {
    let mut amf = SimulatedAmf::new(PeerScript::default());
    let reply = amf.respond(PeerMessage::new(
        EntityId::new("amf-1"),
        Pdu::ErrorIndication {
            cause: Cause::Misc("unspecified".to_string()),
        },
    ));
    assert!(reply.is_none());
}

#[tokio::test]
async fn run_answers_until_requests_close() {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let peer = tokio::spawn(SimulatedAmf::new(script(1, None)).run(request_rx, reply_tx));

    request_tx.send(setup_request()).unwrap();
    let first = reply_rx.recv().await.unwrap();
    assert!(matches!(first.pdu, Pdu::NgSetupFailure(_)));

    request_tx.send(setup_request()).unwrap();
    let second = reply_rx.recv().await.unwrap();
    assert!(matches!(second.pdu, Pdu::NgSetupResponse(_)));

    drop(request_tx);
    peer.await.unwrap();
    assert!(reply_rx.recv().await.is_none());
}
