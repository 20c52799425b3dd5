// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RAN Configuration Update exchange (TS 38.413 §8.7.2)

use super::{Reply, RetryOutcome, RetryProtocol};
use crate::message::{
    Pdu, RanConfigurationUpdate, RanConfigurationUpdateAcknowledge, RanConfigurationUpdateFailure,
};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct RanConfigUpdate;

pub type RanConfigUpdateOutcome = RetryOutcome<RanConfigUpdate>;

impl RetryProtocol for RanConfigUpdate {
    type Request = RanConfigurationUpdate;
    type Response = RanConfigurationUpdateAcknowledge;
    type Failure = RanConfigurationUpdateFailure;

    const KIND: &'static str = "ran_configuration_update";

    fn request_pdu(request: &RanConfigurationUpdate) -> Pdu {
        Pdu::RanConfigurationUpdate(request.clone())
    }

    fn match_reply(
        pdu: &Pdu,
    ) -> Option<Reply<RanConfigurationUpdateAcknowledge, RanConfigurationUpdateFailure>> {
        match pdu {
            Pdu::RanConfigurationUpdateAcknowledge(ack) => Some(Reply::Success(ack.clone())),
            Pdu::RanConfigurationUpdateFailure(failure) => Some(Reply::Failure(failure.clone())),
            _ => None,
        }
    }

    fn time_to_wait(failure: &RanConfigurationUpdateFailure) -> Option<Duration> {
        failure.time_to_wait.map(|ttw| ttw.as_duration())
    }

    fn describe(failure: &RanConfigurationUpdateFailure) -> String {
        failure.cause.to_string()
    }
}
