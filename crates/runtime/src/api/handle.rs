//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! feeding UI events, applying actions, saving, and streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use landscape_core::{
    Action, ExecutionOutcome, LandscapingMachine, SaveCredentials, Snapshot, WorkflowEvent,
};

use super::errors::{Result, RuntimeError};
use super::report::{DispatchReport, SessionView};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with one player session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    view_rx: watch::Receiver<SessionView>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        view_rx: watch::Receiver<SessionView>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            view_rx,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Feed one UI event to the placement machine.
    ///
    /// Events are processed strictly in the order they reach the session.
    /// An event with no transition in the current state comes back with
    /// `handled == false`; that is not an error.
    pub async fn dispatch(&self, event: WorkflowEvent) -> Result<DispatchReport> {
        self.request(|reply| Command::Dispatch { event, reply }).await
    }

    /// Request an autosave of the current snapshot.
    ///
    /// Dropped while a save is already in flight.
    pub async fn save(&self, credentials: SaveCredentials) -> Result<DispatchReport> {
        self.request(|reply| Command::Save { credentials, reply }).await
    }

    /// Apply an action directly, bypassing the placement machine.
    pub async fn execute(&self, action: Action) -> Result<ExecutionOutcome> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
            .map_err(RuntimeError::ActionRejected)
    }

    /// Query the current snapshot (read-only copy)
    pub async fn query_state(&self) -> Result<Snapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Placement machine as of the last processed command.
    pub fn machine(&self) -> LandscapingMachine {
        self.view_rx.borrow().machine.clone()
    }

    /// Latest published view of the session.
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    /// Observe the session view as it changes.
    pub fn observe(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Applied, rejected, and blocked actions
    /// - `Topic::Workflow` - How the placement machine reacted to each event
    /// - `Topic::Autosave` - Save started, saved, failed
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
