//! High-level session orchestrator.
//!
//! A session owns the background workers for one player, wires up the
//! command, event, and view channels, and exposes a builder-based API for
//! clients to drive it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use landscape_content::{ContentFactory, LoadResult};
use landscape_core::{
    IdGenerator, Inventory, LandscapingMachine, Quantity, Snapshot, WorkflowContext,
};

use crate::api::{
    AnalyticsSink, Clock, PersistenceBackend, Result, RuntimeError, SessionHandle, SessionView,
    SystemClock, TracingAnalytics,
};
use crate::events::EventBus;
use crate::ids::UuidIds;
use crate::oracle::OracleManager;
use crate::repository::{InMemorySnapshotRepo, RepositoryBackend};
use crate::workers::{AutosaveWorker, SessionParts, SessionWorker};

/// Session configuration shared across the orchestrator and workers.
///
/// Read from the `[session]` table of the content `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
    /// Length of generated object ids.
    pub id_length: usize,
    /// Upper bound on one persistence call. `None` waits indefinitely.
    pub autosave_timeout_ms: Option<u64>,
}

impl SessionConfig {
    pub const SECTION: &'static str = "session";

    pub fn from_factory(factory: &ContentFactory) -> LoadResult<Self> {
        factory.load_section(Self::SECTION)
    }

    pub fn autosave_timeout(&self) -> Option<Duration> {
        self.autosave_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_buffer: 32,
            event_buffer: 100,
            id_length: UuidIds::DEFAULT_LENGTH,
            autosave_timeout_ms: None,
        }
    }
}

/// One running player session.
///
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Session {
    session_id: String,
    handle: SessionHandle,
    session_worker: JoinHandle<()>,
    autosave_worker: JoinHandle<()>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Shutdown the session gracefully
    ///
    /// Waits for every outstanding handle to be dropped and for an in-flight
    /// save to finish.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.session_worker
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.autosave_worker
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    session_id: Option<String>,
    snapshot: Option<Snapshot>,
    machine: LandscapingMachine,
    oracles: Option<OracleManager>,
    persistence: Option<Arc<dyn PersistenceBackend>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Box<dyn IdGenerator + Send>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            session_id: None,
            snapshot: None,
            machine: LandscapingMachine::new(),
            oracles: None,
            persistence: None,
            analytics: None,
            clock: None,
            ids: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Id the session is persisted under. Random when not set.
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Provide the snapshot to start from
    pub fn initial_state(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Start the placement machine with `context`, e.g. an item already
    /// selected.
    pub fn workflow(mut self, context: WorkflowContext) -> Self {
        self.machine = LandscapingMachine::with_context(context);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Persistence boundary. Defaults to an in-memory repository.
    pub fn persistence(mut self, backend: Arc<dyn PersistenceBackend>) -> Self {
        self.persistence = Some(backend);
        self
    }

    /// Analytics sink. Defaults to [`TracingAnalytics`].
    pub fn analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    /// Clock used to stamp applied actions. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Object id source. Defaults to [`UuidIds`] of `config.id_length`.
    pub fn ids(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Build the session and spawn its workers
    pub async fn build(self) -> Result<Session> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingCatalog)?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let persistence: Arc<dyn PersistenceBackend> = match self.persistence {
            Some(backend) => backend,
            None => Arc::new(RepositoryBackend::new(
                Arc::new(InMemorySnapshotRepo::new()),
                Arc::clone(&clock),
            )),
        };
        let analytics: Arc<dyn AnalyticsSink> = match self.analytics {
            Some(sink) => sink,
            None => Arc::new(TracingAnalytics),
        };
        let ids: Box<dyn IdGenerator + Send> = match self.ids {
            Some(ids) => ids,
            None => Box::new(UuidIds::new(self.config.id_length)),
        };
        let session_id = self
            .session_id
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let snapshot = self
            .snapshot
            .unwrap_or_else(|| Snapshot::new(Quantity::ZERO, Inventory::new()));

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer);
        let (view_tx, view_rx) = watch::channel(SessionView::default());

        let (autosave_worker, coordinator) = AutosaveWorker::new(
            session_id.clone(),
            persistence,
            self.config.autosave_timeout(),
            command_tx.downgrade(),
        );

        let handle = SessionHandle::new(command_tx, event_bus.clone(), view_rx);

        let session_worker = SessionWorker::new(
            SessionParts {
                session_id: session_id.clone(),
                snapshot,
                machine: self.machine,
                oracles,
                ids,
                clock,
                analytics,
            },
            coordinator,
            command_rx,
            event_bus,
            view_tx,
        );

        let session_worker = tokio::spawn(async move {
            session_worker.run().await;
        });
        let autosave_worker = tokio::spawn(async move {
            autosave_worker.run().await;
        });

        Ok(Session {
            session_id,
            handle,
            session_worker,
            autosave_worker,
        })
    }
}
