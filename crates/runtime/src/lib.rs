//! Runtime orchestration for player sessions.
//!
//! This crate wires the deterministic core (reducer and placement machine)
//! to tokio workers, content oracles, repositories, and the persistence and
//! analytics boundaries. Consumers embed [`Session`] and interact with it
//! through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod ids;
pub mod oracle;
pub mod repository;
pub mod session;

mod workers;

pub use api::{
    AnalyticsSink, Clock, DispatchReport, FixedClock, PersistError, PersistenceBackend,
    RecordingAnalytics, Result, RuntimeError, SessionHandle, SessionView, SystemClock,
    TracingAnalytics,
};
pub use events::{AutosaveEvent, Event, EventBus, SessionEvent, Topic, WorkflowNotice};
pub use ids::UuidIds;
pub use oracle::OracleManager;
pub use repository::{
    FileSnapshotRepo, InMemorySnapshotRepo, RepositoryBackend, RepositoryError, SavedSession,
    SnapshotRepository,
};
pub use session::{Session, SessionBuilder, SessionConfig};
