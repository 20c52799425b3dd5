// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message builders shared by tests across the workspace
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::message::{
    Cause, GlobalGnbId, NgSetupFailure, NgSetupRequest, NgSetupResponse, PagingDrx, Pdu,
    RanConfigurationUpdate, RanConfigurationUpdateAcknowledge, RanConfigurationUpdateFailure,
    SupportedTa, TimeToWait,
};

pub const AMF_NAME: &str = "open5gs-amf0";

pub fn ng_setup_request() -> NgSetupRequest {
    NgSetupRequest {
        global_gnb_id: GlobalGnbId {
            plmn: "00101".to_string(),
            gnb_id: 411,
            bit_length: 22,
        },
        ran_node_name: Some("srsgnb01".to_string()),
        supported_ta_list: vec![SupportedTa {
            tac: 7,
            broadcast_plmns: vec!["00101".to_string()],
        }],
        default_paging_drx: PagingDrx::V256,
    }
}

pub fn ng_setup_response() -> Pdu {
    Pdu::NgSetupResponse(NgSetupResponse {
        amf_name: AMF_NAME.to_string(),
        relative_amf_capacity: 255,
        plmn_support_list: vec!["00101".to_string()],
    })
}

pub fn ng_setup_failure() -> Pdu {
    Pdu::NgSetupFailure(NgSetupFailure {
        cause: Cause::Misc("unspecified".to_string()),
        time_to_wait: None,
    })
}

pub fn ng_setup_failure_with_time_to_wait(time_to_wait: TimeToWait) -> Pdu {
    Pdu::NgSetupFailure(NgSetupFailure {
        cause: Cause::Misc("unspecified".to_string()),
        time_to_wait: Some(time_to_wait),
    })
}

pub fn ran_configuration_update() -> RanConfigurationUpdate {
    RanConfigurationUpdate {
        ran_node_name: Some("srsgnb01".to_string()),
        supported_ta_list: vec![SupportedTa {
            tac: 8,
            broadcast_plmns: vec!["00101".to_string()],
        }],
    }
}

pub fn ran_configuration_update_ack() -> Pdu {
    Pdu::RanConfigurationUpdateAcknowledge(RanConfigurationUpdateAcknowledge::default())
}

pub fn ran_configuration_update_failure(time_to_wait: Option<TimeToWait>) -> Pdu {
    Pdu::RanConfigurationUpdateFailure(RanConfigurationUpdateFailure {
        cause: Cause::RadioNetwork("unknown-plmn".to_string()),
        time_to_wait,
    })
}
