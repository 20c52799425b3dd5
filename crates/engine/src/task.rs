// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suspendable procedure tasks
//!
//! A task wraps one pure state machine together with the result slot its
//! handle reads. The engine resumes a task only with a [`Wake`] that matches
//! the task's current [`WaitingFor`] tag.

use crate::handle::{ProcedureHandle, ResultSlot};
use ngp_core::procedure::connection;
use ngp_core::{
    AmfConnection, AmfConnectionEvent, AmfConnectionOutcome, Effect, EntityId, NgSetupOutcome,
    Pdu, ProcedureEvent, ProcedureId, RetryOutcome, RetryProcedure, RetryProtocol, WaitingFor,
};
use std::rc::Rc;

/// Reason a suspended task is resumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wake {
    Launch,
    Message(Pdu),
    TimerFired,
    /// A sub-procedure the task awaits has settled
    ProcedureDone(ProcedureId),
    Cancel,
}

impl Wake {
    pub fn name(&self) -> &'static str {
        match self {
            Wake::Launch => "launch",
            Wake::Message(_) => "message",
            Wake::TimerFired => "timer",
            Wake::ProcedureDone(_) => "procedure_done",
            Wake::Cancel => "cancel",
        }
    }
}

/// A procedure instance as seen by the engine
pub(crate) trait ProcedureTask {
    fn id(&self) -> &ProcedureId;
    fn entity(&self) -> &EntityId;
    fn kind(&self) -> &'static str;
    fn waiting_for(&self) -> WaitingFor;
    fn is_terminal(&self) -> bool;
    fn is_cancelled(&self) -> bool;
    /// Whether an inbound PDU is a reply this task understands
    fn accepts(&self, pdu: &Pdu) -> bool;
    fn resume(&mut self, wake: Wake) -> Vec<Effect>;

    /// Whether `wake` matches the current suspension point
    fn expects(&self, wake: &Wake) -> bool {
        match wake {
            Wake::Cancel => !self.is_terminal(),
            Wake::Launch => !self.is_terminal() && self.waiting_for() == WaitingFor::Nothing,
            Wake::Message(pdu) => self.waiting_for() == WaitingFor::Response && self.accepts(pdu),
            Wake::TimerFired => self.waiting_for() == WaitingFor::Timer,
            Wake::ProcedureDone(id) => self.waiting_for() == WaitingFor::Procedure(id.clone()),
        }
    }
}

/// Task driving a [`RetryProcedure`]
pub(crate) struct RetryTask<P: RetryProtocol> {
    machine: RetryProcedure<P>,
    slot: ResultSlot<RetryOutcome<P>>,
}

impl<P: RetryProtocol> RetryTask<P> {
    pub(crate) fn new(machine: RetryProcedure<P>) -> (Self, ProcedureHandle<RetryOutcome<P>>) {
        let slot = ResultSlot::default();
        let handle = ProcedureHandle::new(machine.id.clone(), Rc::clone(&slot));
        (Self { machine, slot }, handle)
    }
}

impl<P: RetryProtocol> ProcedureTask for RetryTask<P> {
    fn id(&self) -> &ProcedureId {
        &self.machine.id
    }

    fn entity(&self) -> &EntityId {
        &self.machine.entity
    }

    fn kind(&self) -> &'static str {
        P::KIND
    }

    fn waiting_for(&self) -> WaitingFor {
        self.machine.waiting_for()
    }

    fn is_terminal(&self) -> bool {
        self.machine.is_terminal()
    }

    fn is_cancelled(&self) -> bool {
        self.machine.is_cancelled()
    }

    fn accepts(&self, pdu: &Pdu) -> bool {
        P::match_reply(pdu).is_some()
    }

    fn resume(&mut self, wake: Wake) -> Vec<Effect> {
        let event = match wake {
            Wake::Launch => ProcedureEvent::Launch,
            Wake::Message(pdu) => match P::match_reply(&pdu) {
                Some(reply) => ProcedureEvent::Reply(reply),
                None => return vec![],
            },
            Wake::TimerFired => ProcedureEvent::TimerFired,
            Wake::Cancel => ProcedureEvent::Cancel,
            Wake::ProcedureDone(_) => return vec![],
        };

        let (next, effects) = self.machine.transition(event);
        self.machine = next;
        if let Some(outcome) = &self.machine.outcome {
            // Already-set slots keep their first value
            let _ = self.slot.set(outcome.clone());
        }
        effects
    }
}

/// Task driving an [`AmfConnection`] over its NG Setup sub-procedure
pub(crate) struct ConnectionTask {
    machine: AmfConnection,
    setup: ProcedureHandle<NgSetupOutcome>,
    slot: ResultSlot<AmfConnectionOutcome>,
}

impl ConnectionTask {
    pub(crate) fn new(
        machine: AmfConnection,
        setup: ProcedureHandle<NgSetupOutcome>,
    ) -> (Self, ProcedureHandle<AmfConnectionOutcome>) {
        let slot = ResultSlot::default();
        let handle = ProcedureHandle::new(machine.id.clone(), Rc::clone(&slot));
        (
            Self {
                machine,
                setup,
                slot,
            },
            handle,
        )
    }
}

impl ProcedureTask for ConnectionTask {
    fn id(&self) -> &ProcedureId {
        &self.machine.id
    }

    fn entity(&self) -> &EntityId {
        &self.machine.entity
    }

    fn kind(&self) -> &'static str {
        connection::KIND
    }

    fn waiting_for(&self) -> WaitingFor {
        self.machine.waiting_for()
    }

    fn is_terminal(&self) -> bool {
        self.machine.is_terminal()
    }

    fn is_cancelled(&self) -> bool {
        self.machine.is_cancelled()
    }

    fn accepts(&self, _pdu: &Pdu) -> bool {
        false
    }

    fn resume(&mut self, wake: Wake) -> Vec<Effect> {
        let event = match wake {
            Wake::Launch => AmfConnectionEvent::Launch,
            Wake::ProcedureDone(id) if &id == self.setup.id() => match self.setup.try_get() {
                Some(outcome) => AmfConnectionEvent::SetupSettled(outcome.clone()),
                None => return vec![],
            },
            Wake::Cancel => AmfConnectionEvent::Cancel,
            _ => return vec![],
        };

        let (next, effects) = self.machine.transition(event);
        self.machine = next;
        if let Some(outcome) = &self.machine.outcome {
            let _ = self.slot.set(outcome.clone());
        }
        effects
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
