//! Session worker that owns the authoritative [`landscape_core::Snapshot`].
//!
//! Receives commands from [`SessionHandle`](crate::api::SessionHandle), feeds
//! UI events to the placement machine, applies the actions it emits through
//! [`landscape_core::engine::apply`], and publishes events to the EventBus.
//! Commands are handled one at a time in arrival order; the only suspension
//! point, the persistence call, runs on the autosave worker instead.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, trace, warn};

use landscape_core::engine;
use landscape_core::spatial::{self, Footprint};
use landscape_core::{
    Action, AppliedAction, CatalogOracle, Coordinates, EditingState, Effect, ExecuteError,
    ExecutionOutcome, IdGenerator, ItemName, LandscapingMachine, SaveCredentials, SaveReceipt,
    SaveRequest, Snapshot, WorkflowEvent,
};

use super::autosave::AutosaveCoordinator;
use crate::api::{AnalyticsSink, Clock, DispatchReport, PersistError, SessionView};
use crate::events::{AutosaveEvent, Event, EventBus, SessionEvent, WorkflowNotice};
use crate::oracle::OracleManager;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Feed a UI event to the placement machine.
    Dispatch {
        event: WorkflowEvent,
        reply: oneshot::Sender<DispatchReport>,
    },
    /// Send `SAVE` with the live snapshot and unsaved actions.
    Save {
        credentials: SaveCredentials,
        reply: oneshot::Sender<DispatchReport>,
    },
    /// Apply an action without going through the machine.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome, ExecuteError>>,
    },
    /// Query the current snapshot (read-only).
    QueryState { reply: oneshot::Sender<Snapshot> },
    /// Outcome of the persistence call, sent by the autosave worker.
    SaveFinished {
        result: Result<SaveReceipt, PersistError>,
    },
}

/// Everything a session worker starts from.
pub(crate) struct SessionParts {
    pub session_id: String,
    pub snapshot: Snapshot,
    pub machine: LandscapingMachine,
    pub oracles: OracleManager,
    pub ids: Box<dyn IdGenerator + Send>,
    pub clock: Arc<dyn Clock>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

/// Background task that processes session commands.
pub struct SessionWorker {
    session_id: String,
    snapshot: Snapshot,
    machine: LandscapingMachine,
    unsaved: Vec<AppliedAction>,
    applied: u64,
    revision: u64,
    oracles: OracleManager,
    ids: Box<dyn IdGenerator + Send>,
    clock: Arc<dyn Clock>,
    analytics: Arc<dyn AnalyticsSink>,
    autosave: AutosaveCoordinator,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    view_tx: watch::Sender<SessionView>,
}

impl SessionWorker {
    pub(crate) fn new(
        parts: SessionParts,
        autosave: AutosaveCoordinator,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        view_tx: watch::Sender<SessionView>,
    ) -> Self {
        info!(
            target: "runtime::session",
            session = %parts.session_id,
            balance = %parts.snapshot.balance,
            placed = parts.snapshot.placed.len(),
            "SessionWorker initialized"
        );

        let worker = Self {
            session_id: parts.session_id,
            snapshot: parts.snapshot,
            machine: parts.machine,
            unsaved: Vec::new(),
            applied: 0,
            revision: 0,
            oracles: parts.oracles,
            ids: parts.ids,
            clock: parts.clock,
            analytics: parts.analytics,
            autosave,
            command_rx,
            event_bus,
            view_tx,
        };
        worker.publish_view();
        worker
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        info!(target: "runtime::session", session = %self.session_id, "SessionWorker stopped");
    }

    /// Handles one command. The view is published before any reply so a
    /// caller that awaited the reply observes the new state.
    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { event, reply } => {
                let report = self.handle_dispatch(event);
                self.publish_view();
                if reply.send(report).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::Save { credentials, reply } => {
                let request = SaveRequest {
                    snapshot: Snapshot::default(),
                    actions: Vec::new(),
                    credentials,
                };
                let report = self.handle_dispatch(WorkflowEvent::Save(request));
                self.publish_view();
                if reply.send(report).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.apply_action(action).map(|(_, outcome)| outcome);
                self.publish_view();
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.snapshot.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::SaveFinished { result } => {
                self.handle_save_finished(result);
                self.publish_view();
            }
        }
    }

    /// Prepares `event` against the live session, then runs it through the
    /// machine.
    ///
    /// The machine trusts the collision flag it is given, so this is where
    /// the flag is computed and where `PLACE` is withheld while it is set.
    fn handle_dispatch(&mut self, mut event: WorkflowEvent) -> DispatchReport {
        let mut report = DispatchReport::default();

        match &mut event {
            WorkflowEvent::Update {
                coordinates,
                collision_detected,
            } => {
                if let Some(detected) = self.selection_collides(*coordinates) {
                    *collision_detected = detected;
                }
            }
            WorkflowEvent::Place { .. } => {
                if let Some(name) = self.blocked_placement() {
                    let coordinates = self.machine.context.coordinates;
                    debug!(
                        target: "runtime::session",
                        item = %name,
                        %coordinates,
                        "PLACE withheld: pending placement collides"
                    );
                    self.publish(Event::Session(SessionEvent::PlacementBlocked {
                        name,
                        coordinates,
                    }));
                    report.blocked = true;
                    return report;
                }
            }
            WorkflowEvent::Save(request) => {
                request.snapshot = self.snapshot.clone();
                request.actions = self.unsaved.clone();
            }
            _ => {}
        }

        self.react(event, &mut report);
        report
    }

    /// Sends `event` to the machine and carries out the effects, including
    /// any follow-up events those effects produce.
    fn react(&mut self, event: WorkflowEvent, report: &mut DispatchReport) {
        let mut queue = VecDeque::from([event]);
        let mut first = true;

        while let Some(event) = queue.pop_front() {
            let name = event.as_str();
            let reaction = self.machine.send(event, &mut *self.ids);
            self.publish_notice(name, reaction.handled);
            if first {
                report.handled = reaction.handled;
                first = false;
            }

            for effect in reaction.effects {
                match effect {
                    Effect::Dispatch(action) => match self.apply_action(action.clone()) {
                        Ok((applied, _)) => report.applied.push(applied),
                        Err(error) => report.rejected.push((action, error)),
                    },
                    Effect::Persist(request) => {
                        let actions = request.actions.len();
                        match self.autosave.submit(request) {
                            Ok(()) => {
                                debug!(target: "runtime::autosave", actions, "save submitted");
                                self.publish(Event::Autosave(AutosaveEvent::Started { actions }));
                                report.save_started = true;
                            }
                            Err(error) => {
                                warn!(target: "runtime::autosave", %error, "save not submitted");
                                queue.push_back(WorkflowEvent::SaveFailed {
                                    reason: error.to_string(),
                                });
                            }
                        }
                    }
                    Effect::SaveCompleted(receipt) => self.announce_saved(receipt),
                    Effect::SaveFailed(reason) => self.announce_failed(reason),
                }
            }
        }
    }

    fn handle_save_finished(&mut self, result: Result<SaveReceipt, PersistError>) {
        if let Ok(receipt) = &result {
            let covered = receipt.actions.min(self.unsaved.len());
            self.unsaved.drain(..covered);
            self.revision = receipt.revision;
        }

        // A cancelled machine ignores the outcome; report it here instead.
        if self.machine.is_done() {
            match result {
                Ok(receipt) => self.announce_saved(receipt),
                Err(error) => self.announce_failed(error.to_string()),
            }
            return;
        }

        let event = match result {
            Ok(receipt) => WorkflowEvent::SaveSucceeded(receipt),
            Err(error) => WorkflowEvent::SaveFailed {
                reason: error.to_string(),
            },
        };
        self.react(event, &mut DispatchReport::default());
    }

    /// Applies `action` to the live snapshot.
    ///
    /// The snapshot is only replaced when every phase passes.
    fn apply_action(
        &mut self,
        action: Action,
    ) -> Result<(AppliedAction, ExecutionOutcome), ExecuteError> {
        let now = self.clock.now();
        let env = self.oracles.as_game_env(now);

        match engine::apply(&self.snapshot, &env, &action) {
            Ok(outcome) => {
                self.snapshot = outcome.snapshot.clone();
                for event in &outcome.events {
                    self.analytics.record(event);
                }

                let applied = AppliedAction::new(action, now);
                self.unsaved.push(applied.clone());
                self.applied += 1;

                debug!(
                    target: "runtime::session",
                    action = applied.action.as_str(),
                    item = %applied.action.item(),
                    "action applied"
                );
                self.publish(Event::Session(SessionEvent::ActionApplied {
                    action: applied.clone(),
                    events: outcome.events.clone(),
                }));
                Ok((applied, outcome))
            }
            Err(error) => {
                debug!(
                    target: "runtime::session",
                    action = action.as_str(),
                    item = %action.item(),
                    phase = error.phase().as_str(),
                    %error,
                    "action rejected"
                );
                self.publish(Event::Session(SessionEvent::ActionRejected {
                    action,
                    phase: error.phase(),
                    error: error.to_string(),
                }));
                Err(error)
            }
        }
    }

    /// Whether the selected item would overlap something at `coordinates`.
    ///
    /// `None` when nothing is selected or the item has no footprint.
    fn selection_collides(&self, coordinates: Coordinates) -> Option<bool> {
        let selection = self.machine.context.selection.as_ref()?;
        self.collides(&selection.name, coordinates)
    }

    fn collides(&self, name: &ItemName, coordinates: Coordinates) -> Option<bool> {
        let catalog = self.oracles.catalog();
        let dimensions = catalog.dimensions(name)?;
        let detector = spatial::detector(
            self.oracles.config().spatial_index,
            &self.snapshot,
            catalog,
        );
        Some(detector.collides(&Footprint::at(coordinates, dimensions), None))
    }

    /// Name of the selected item when a `PLACE` right now must be withheld.
    fn blocked_placement(&self) -> Option<ItemName> {
        if self.machine.is_done() || self.machine.editing != EditingState::Placing {
            return None;
        }
        let context = &self.machine.context;
        let selection = context.selection.as_ref()?;
        let blocked = context.collision_detected
            || self.selection_collides(context.coordinates) == Some(true);
        blocked.then(|| selection.name.clone())
    }

    fn announce_saved(&self, receipt: SaveReceipt) {
        info!(
            target: "runtime::autosave",
            session = %self.session_id,
            revision = receipt.revision,
            actions = receipt.actions,
            "session saved"
        );
        self.publish(Event::Autosave(AutosaveEvent::Saved(receipt)));
    }

    fn announce_failed(&self, reason: String) {
        error!(
            target: "runtime::autosave",
            session = %self.session_id,
            %reason,
            "autosave failed"
        );
        self.publish(Event::Autosave(AutosaveEvent::Failed { reason }));
    }

    fn publish_notice(&self, event: &str, handled: bool) {
        let (saving, editing) = (self.machine.saving, self.machine.editing);
        let notice = if handled {
            WorkflowNotice::Transitioned {
                event: event.to_owned(),
                saving,
                editing,
            }
        } else {
            trace!(
                target: "runtime::session",
                event,
                ?saving,
                ?editing,
                "workflow event ignored"
            );
            WorkflowNotice::Ignored {
                event: event.to_owned(),
                saving,
                editing,
            }
        };
        self.publish(Event::Workflow(notice));
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }

    fn publish_view(&self) {
        self.view_tx.send_replace(SessionView {
            machine: self.machine.clone(),
            applied: self.applied,
            unsaved: self.unsaved.len(),
            revision: self.revision,
        });
    }
}
