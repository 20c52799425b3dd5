// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative procedure engine
//!
//! The engine owns every procedure instance of one NG session. It is driven
//! from a single context through four entry points: launches, inbound
//! messages, tick advances and cancellation. Every entry point queues wakes
//! and drains the queue in FIFO order before returning, so procedures never
//! observe overlapping mutation.

use crate::error::EngineError;
use crate::executor::Executor;
use crate::handle::ProcedureHandle;
use crate::task::{ConnectionTask, ProcedureTask, RetryTask, Wake};
use ngp_adapters::MessageGateway;
use ngp_core::procedure::connection;
use ngp_core::{
    AmfConnection, AmfConnectionOutcome, EngineConfig, EntityId, Event, IdGen, NgSetup,
    NgSetupOutcome, NgSetupRequest, PeerMessage, ProcedureId, ProcedureRequest,
    RanConfigUpdate, RanConfigUpdateOutcome, RanConfigurationUpdate, RetryOutcome,
    RetryProcedure, RetryProtocol, TimerService, TransactionRegistry, WaitingFor,
};
use std::collections::{HashMap, VecDeque};

/// Teardown of transactions not bound to any entity
///
/// Invoked once at the end of every transport-lost pass.
pub trait CommonTransactions {
    fn close_common_transactions(&mut self);
}

/// Default hook: there are no common transactions to close
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCommonTransactions;

impl CommonTransactions for NoCommonTransactions {
    fn close_common_transactions(&mut self) {}
}

/// Single-threaded engine running the procedures of one session
pub struct Engine<G: MessageGateway, I: IdGen> {
    executor: Executor<G>,
    id_gen: I,
    config: EngineConfig,
    registry: TransactionRegistry,
    tasks: HashMap<ProcedureId, Box<dyn ProcedureTask>>,
    /// Sub-procedure → the procedure awaiting it
    parents: HashMap<ProcedureId, ProcedureId>,
    wakes: VecDeque<(ProcedureId, Wake)>,
    /// Set while a transport-lost pass is cancelling instances
    tearing_down: bool,
    common: Box<dyn CommonTransactions>,
}

impl<G: MessageGateway, I: IdGen> Engine<G, I> {
    pub fn new(gateway: G, id_gen: I, config: EngineConfig) -> Self {
        let timers = TimerService::new(config.tick);
        Self {
            executor: Executor::new(gateway, timers),
            id_gen,
            config,
            registry: TransactionRegistry::new(),
            tasks: HashMap::new(),
            parents: HashMap::new(),
            wakes: VecDeque::new(),
            tearing_down: false,
            common: Box::new(NoCommonTransactions),
        }
    }

    /// Install the hook that closes non-entity transactions on transport loss
    pub fn with_common_transactions(mut self, common: impl CommonTransactions + 'static) -> Self {
        self.common = Box::new(common);
        self
    }

    // ------------------------------------------------------------------
    // Launch API
    // ------------------------------------------------------------------

    /// NG Setup request for `entity` carrying the configured retry budget
    pub fn setup_request(
        &self,
        entity: EntityId,
        message: NgSetupRequest,
    ) -> ProcedureRequest<NgSetupRequest> {
        ProcedureRequest::new(entity, message, self.config.max_setup_retries)
    }

    /// RAN Configuration Update request for `entity` carrying the
    /// configured retry budget
    pub fn config_update_request(
        &self,
        entity: EntityId,
        message: RanConfigurationUpdate,
    ) -> ProcedureRequest<RanConfigurationUpdate> {
        ProcedureRequest::new(entity, message, self.config.max_config_update_retries)
    }

    /// Start an NG Setup against `request.entity`
    ///
    /// The request is sent before this returns; the handle becomes ready
    /// once the procedure succeeds, fails, exhausts its retries or is
    /// cancelled.
    pub fn launch_setup_procedure(
        &mut self,
        request: ProcedureRequest<NgSetupRequest>,
    ) -> Result<ProcedureHandle<NgSetupOutcome>, EngineError> {
        self.launch_retry::<NgSetup>(request)
    }

    /// Start a RAN Configuration Update against `request.entity`
    pub fn launch_config_update(
        &mut self,
        request: ProcedureRequest<RanConfigurationUpdate>,
    ) -> Result<ProcedureHandle<RanConfigUpdateOutcome>, EngineError> {
        self.launch_retry::<RanConfigUpdate>(request)
    }

    /// Connect to the AMF: runs an NG Setup against `request.entity` as a
    /// sub-procedure of a connection registered under `controller`
    pub fn launch_amf_connection(
        &mut self,
        controller: EntityId,
        request: ProcedureRequest<NgSetupRequest>,
    ) -> Result<ProcedureHandle<AmfConnectionOutcome>, EngineError> {
        self.ensure_not_active(&controller, connection::KIND)?;

        let amf = request.entity.clone();
        let setup = self.launch_retry::<NgSetup>(request)?;
        let id = match self.allocate_id() {
            Ok(id) => id,
            Err(e) => {
                self.cancel(setup.id());
                return Err(e);
            }
        };
        let machine = AmfConnection::new(id.clone(), controller.clone(), amf, setup.id().clone());
        let (task, handle) = ConnectionTask::new(machine, setup.clone());

        if let Err(e) = self.registry.register(controller.clone(), id.clone()) {
            self.cancel(setup.id());
            return Err(e.into());
        }
        self.tasks.insert(id.clone(), Box::new(task));
        self.parents.insert(setup.id().clone(), id.clone());
        self.executor.emit(Event::ProcedureLaunched {
            id: id.clone(),
            kind: connection::KIND.to_string(),
            entity: controller,
        });

        self.wakes.push_back((id.clone(), Wake::Launch));
        if setup.ready() {
            self.wakes.push_back((id, Wake::ProcedureDone(setup.id().clone())));
        }
        self.run();
        Ok(handle)
    }

    fn launch_retry<P: RetryProtocol>(
        &mut self,
        request: ProcedureRequest<P::Request>,
    ) -> Result<ProcedureHandle<RetryOutcome<P>>, EngineError> {
        let id = self.allocate_id()?;
        self.ensure_not_active(&request.entity, P::KIND)?;

        let entity = request.entity.clone();
        self.registry.register(entity.clone(), id.clone())?;
        let (task, handle) = RetryTask::<P>::new(RetryProcedure::new(id.clone(), request));
        self.tasks.insert(id.clone(), Box::new(task));
        self.executor.emit(Event::ProcedureLaunched {
            id: id.clone(),
            kind: P::KIND.to_string(),
            entity,
        });

        self.wakes.push_back((id, Wake::Launch));
        self.run();
        Ok(handle)
    }

    fn allocate_id(&self) -> Result<ProcedureId, EngineError> {
        let id = ProcedureId(self.id_gen.next());
        if self.tasks.contains_key(&id) {
            return Err(EngineError::DuplicateId(id));
        }
        Ok(id)
    }

    /// One live instance per procedure kind and entity
    fn ensure_not_active(&self, entity: &EntityId, kind: &'static str) -> Result<(), EngineError> {
        let active = self.registry.find(entity).is_some_and(|ids| {
            ids.iter()
                .filter_map(|id| self.tasks.get(id))
                .any(|task| task.kind() == kind && !task.is_terminal())
        });
        if active {
            return Err(EngineError::AlreadyActive {
                entity: entity.clone(),
                kind,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Route an inbound message to the instance awaiting it
    ///
    /// Returns whether the message was delivered. Unmatched messages are
    /// dropped with a warning.
    pub fn handle_message(&mut self, message: PeerMessage) -> bool {
        let PeerMessage { entity, pdu } = message;
        let target = self.registry.find(&entity).and_then(|ids| {
            ids.iter()
                .filter_map(|id| self.tasks.get(id))
                .find(|task| task.expects(&Wake::Message(pdu.clone())))
                .map(|task| task.id().clone())
        });

        let Some(id) = target else {
            tracing::warn!(%entity, pdu = pdu.name(), "no procedure awaiting message, dropping");
            return false;
        };

        tracing::debug!(%entity, procedure = %id, pdu = pdu.name(), "routing message");
        self.wakes.push_back((id, Wake::Message(pdu)));
        self.run();
        true
    }

    /// Advance logical time by one tick, resuming procedures whose timers fire
    pub fn advance_time(&mut self) {
        for timer in self.executor.advance() {
            self.wakes.push_back((timer.owner, Wake::TimerFired));
        }
        self.run();
    }

    /// Advance logical time by `ticks` ticks, one at a time
    pub fn advance_by(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.advance_time();
        }
    }

    /// Cancel a live procedure and forget it
    ///
    /// Returns false if the procedure is unknown or already settled.
    pub fn cancel(&mut self, id: &ProcedureId) -> bool {
        let live = self.tasks.get(id).is_some_and(|task| !task.is_terminal());
        if !live {
            return false;
        }
        self.wakes.push_back((id.clone(), Wake::Cancel));
        self.run();
        true
    }

    /// Drop an entity and every instance registered under it without
    /// resuming them
    pub fn remove(&mut self, entity: &EntityId) -> Vec<ProcedureId> {
        let ids: Vec<ProcedureId> = self
            .registry
            .remove(entity)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default();
        for id in &ids {
            self.forget(id);
        }
        ids
    }

    /// Tear down after the transport to the peers was lost
    ///
    /// Cancels every registered instance and returns the entities whose
    /// procedures were cancelled, in registry order. Entities that settled
    /// as a side effect of the pass are not reported. A parent whose
    /// sub-procedure is cancelled here is cancelled as well. Every reported
    /// entity is removed from the registry.
    pub fn on_transport_lost(&mut self) -> Vec<EntityId> {
        let snapshot = self.registry.entities();
        tracing::info!(entities = snapshot.len(), "transport lost, cancelling transactions");

        self.tearing_down = true;
        for entity in &snapshot {
            // An earlier cancellation may have settled this entity already
            let Some(ids) = self.registry.find(entity).cloned() else {
                continue;
            };
            for id in ids {
                if self.tasks.get(&id).is_some_and(|task| !task.is_terminal()) {
                    self.wakes.push_back((id, Wake::Cancel));
                    self.run();
                }
            }
        }
        self.tearing_down = false;

        let lost: Vec<EntityId> = snapshot
            .into_iter()
            .filter(|entity| self.registry.contains(entity))
            .collect();

        if !lost.is_empty() {
            self.executor.emit(Event::TransactionsLost {
                entities: lost.clone(),
            });
        }
        for entity in &lost {
            self.remove(entity);
        }

        self.common.close_common_transactions();
        lost
    }

    // ------------------------------------------------------------------
    // Wake queue
    // ------------------------------------------------------------------

    /// Drain the wake queue in FIFO order
    fn run(&mut self) {
        while let Some((id, wake)) = self.wakes.pop_front() {
            self.dispatch(id, wake);
        }
    }

    fn dispatch(&mut self, id: ProcedureId, wake: Wake) {
        let Some(task) = self.tasks.get_mut(&id) else {
            tracing::trace!(procedure = %id, wake = wake.name(), "discarding wake for unknown procedure");
            return;
        };
        if !task.expects(&wake) {
            tracing::trace!(procedure = %id, wake = wake.name(), "discarding stale wake");
            return;
        }

        let span = tracing::debug_span!("resume", procedure = %id, wake = wake.name());
        let _guard = span.enter();

        let effects = task.resume(wake);
        let settled = task.is_terminal();
        let cancelled = task.is_cancelled();

        let followups = self.executor.execute_all(&id, effects);
        self.wakes.extend(followups);

        if settled {
            self.settle(&id, cancelled);
        }
    }

    /// Bookkeeping once an instance reaches Completed or Cancelled
    fn settle(&mut self, id: &ProcedureId, cancelled: bool) {
        self.executor.release_timer(id);
        if let Some(parent) = self.parents.remove(id) {
            // A sub-procedure torn down with the session takes its parent with it
            let wake = if cancelled && self.tearing_down {
                Wake::Cancel
            } else {
                Wake::ProcedureDone(id.clone())
            };
            self.wakes.push_back((parent, wake));
        }

        // Cancelled instances are reported by the transport-lost pass first
        if cancelled && self.tearing_down {
            return;
        }
        if let Some(task) = self.tasks.get(id) {
            let entity = task.entity().clone();
            self.registry.deregister(&entity, id);
        }
        self.forget(id);
    }

    fn forget(&mut self, id: &ProcedureId) {
        self.executor.release_timer(id);
        self.tasks.remove(id);
        self.parents.remove(id);
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Current logical time in ticks
    pub fn now(&self) -> u64 {
        self.executor.timers().now()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &G {
        self.executor.gateway()
    }

    /// Suspension point of a known procedure
    pub fn waiting_for(&self, id: &ProcedureId) -> Option<WaitingFor> {
        self.tasks.get(id).map(|task| task.waiting_for())
    }

    /// Procedures that have not settled yet
    pub fn active_procedures(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_terminal()).count()
    }

    pub fn pending_timers(&self) -> usize {
        self.executor.timers().pending()
    }

    /// Whether no procedure is left to drive
    pub fn is_idle(&self) -> bool {
        self.active_procedures() == 0
    }

    /// Events emitted so far and not yet drained
    ///
    /// The log is unbounded: long-running callers should take it with
    /// [`drain_events`](Self::drain_events) after each input.
    pub fn events(&self) -> &[Event] {
        self.executor.events()
    }

    /// Take every logged event, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.executor.drain_events()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
