//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the persistence
//! boundary so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use landscape_core::ExecuteError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    ActionRejected(ExecuteError),

    #[error("session requires a catalog to be configured before building")]
    MissingCatalog,
}

/// Failure of one persistence attempt.
///
/// Every variant is recoverable by sending `SAVE` again; none of them touch
/// the in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("persistence backend rejected the save: {0}")]
    Backend(String),

    #[error("save did not complete within {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("a save is already in flight")]
    Busy,

    #[error("repository failure: {0}")]
    Repository(String),

    #[error("autosave worker is not running")]
    Unavailable,
}

impl From<RepositoryError> for PersistError {
    fn from(error: RepositoryError) -> Self {
        Self::Repository(error.to_string())
    }
}
