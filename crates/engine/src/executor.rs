// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::error::ExecuteError;
use crate::task::Wake;
use ngp_adapters::MessageGateway;
use ngp_core::{Effect, Event, FiredTimer, ProcedureId, TimerId, TimerService};
use std::collections::HashMap;

/// Executes procedure effects against the gateway and the timer service
pub(crate) struct Executor<G> {
    gateway: G,
    timers: TimerService,
    /// The single armed timer of each procedure
    armed: HashMap<ProcedureId, TimerId>,
    events: Vec<Event>,
}

impl<G: MessageGateway> Executor<G> {
    pub(crate) fn new(gateway: G, timers: TimerService) -> Self {
        Self {
            gateway,
            timers,
            armed: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Execute a single effect on behalf of `owner`, with tracing
    ///
    /// Returns a wake that should be fed back into the engine's queue.
    pub(crate) fn execute(&mut self, owner: &ProcedureId, effect: Effect) -> Option<(ProcedureId, Wake)> {
        use ngp_core::TracedEffect;

        let span = tracing::info_span!("effect", effect = effect.name(), procedure = %owner);
        let _guard = span.enter();

        tracing::debug!(fields = ?effect.fields(), "executing");

        match self.execute_inner(owner, effect) {
            Ok(wake) => wake,
            Err(e) => {
                // Delivery failures surface through the transport-lost path
                tracing::warn!(error = %e, "effect failed");
                None
            }
        }
    }

    fn execute_inner(
        &mut self,
        owner: &ProcedureId,
        effect: Effect,
    ) -> Result<Option<(ProcedureId, Wake)>, ExecuteError> {
        match effect {
            Effect::Send(message) => {
                self.gateway.send(message)?;
                Ok(None)
            }

            Effect::StartTimer { delay } => {
                self.release_timer(owner);
                let id = self.timers.schedule(owner.clone(), delay);
                self.armed.insert(owner.clone(), id);
                Ok(None)
            }

            Effect::CancelTimer => {
                self.release_timer(owner);
                Ok(None)
            }

            Effect::CancelProcedure { id } => Ok(Some((id, Wake::Cancel))),

            Effect::Emit(event) => {
                tracing::info!(event = event.name(), detail = ?event, "event");
                self.events.push(event);
                Ok(None)
            }
        }
    }

    /// Execute effects in order, collecting follow-up wakes
    pub(crate) fn execute_all(
        &mut self,
        owner: &ProcedureId,
        effects: Vec<Effect>,
    ) -> Vec<(ProcedureId, Wake)> {
        effects
            .into_iter()
            .filter_map(|effect| self.execute(owner, effect))
            .collect()
    }

    /// Cancel the owner's armed timer, if any
    pub(crate) fn release_timer(&mut self, owner: &ProcedureId) -> bool {
        match self.armed.remove(owner) {
            Some(id) => self.timers.cancel(id),
            None => false,
        }
    }

    /// Advance logical time one tick; returns the timers that are still armed
    /// for their owner and have now fired
    pub(crate) fn advance(&mut self) -> Vec<FiredTimer> {
        let fired = self.timers.advance();
        fired
            .into_iter()
            .filter(|timer| {
                let current = self.armed.get(&timer.owner) == Some(&timer.id);
                if current {
                    self.armed.remove(&timer.owner);
                } else {
                    tracing::trace!(timer = %timer.id, owner = %timer.owner, "discarding stale timer");
                }
                current
            })
            .collect()
    }

    pub(crate) fn emit(&mut self, event: Event) {
        tracing::info!(event = event.name(), detail = ?event, "event");
        self.events.push(event);
    }

    pub(crate) fn gateway(&self) -> &G {
        &self.gateway
    }

    pub(crate) fn timers(&self) -> &TimerService {
        &self.timers
    }

    pub(crate) fn has_timer(&self, owner: &ProcedureId) -> bool {
        self.armed.contains_key(owner)
    }

    pub(crate) fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
