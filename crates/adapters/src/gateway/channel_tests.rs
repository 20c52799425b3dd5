// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ngp_core::fixtures;
use ngp_core::{EntityId, Pdu};

fn setup_request() -> PeerMessage {
    PeerMessage::new(
        EntityId::new("amf-1"),
        Pdu::NgSetupRequest(fixtures::ng_setup_request()),
    )
}

#[tokio::test]
async fn channel_gateway_delivers_in_order() {
    let (gateway, mut rx) = ChannelGateway::channel();

    gateway.send(setup_request()).unwrap();
    gateway
        .send(PeerMessage::new(
            EntityId::new("amf-1"),
            Pdu::RanConfigurationUpdate(fixtures::ran_configuration_update()),
        ))
        .unwrap();

    assert_eq!(rx.recv().await.unwrap().pdu.name(), "ng_setup_request");
    assert_eq!(
        rx.recv().await.unwrap().pdu.name(),
        "ran_configuration_update"
    );
}

#[tokio::test]
async fn channel_gateway_reports_closed_receiver() {
    let (gateway, rx) = ChannelGateway::channel();
    drop(rx);

    assert!(gateway.is_closed());
    let err = gateway.send(setup_request()).unwrap_err();
    assert_eq!(
        err,
        GatewayError::Closed {
            entity: "amf-1".to_string(),
            pdu: "ng_setup_request",
        }
    );
}
