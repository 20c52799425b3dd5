// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NG Setup exchange (TS 38.413 §8.7.1)
//!
//! Success is the AMF's NG Setup Response. An NG Setup Failure without a
//! time-to-wait is terminal; one with a time-to-wait is retried after the wait.

use super::{Reply, RetryOutcome, RetryProtocol};
use crate::message::{NgSetupFailure, NgSetupRequest, NgSetupResponse, Pdu};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct NgSetup;

pub type NgSetupOutcome = RetryOutcome<NgSetup>;

impl RetryProtocol for NgSetup {
    type Request = NgSetupRequest;
    type Response = NgSetupResponse;
    type Failure = NgSetupFailure;

    const KIND: &'static str = "ng_setup";

    fn request_pdu(request: &NgSetupRequest) -> Pdu {
        Pdu::NgSetupRequest(request.clone())
    }

    fn match_reply(pdu: &Pdu) -> Option<Reply<NgSetupResponse, NgSetupFailure>> {
        match pdu {
            Pdu::NgSetupResponse(response) => Some(Reply::Success(response.clone())),
            Pdu::NgSetupFailure(failure) => Some(Reply::Failure(failure.clone())),
            _ => None,
        }
    }

    fn time_to_wait(failure: &NgSetupFailure) -> Option<Duration> {
        failure.time_to_wait.map(|ttw| ttw.as_duration())
    }

    fn describe(failure: &NgSetupFailure) -> String {
        failure.cause.to_string()
    }
}
