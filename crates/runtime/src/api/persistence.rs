//! Persistence boundary used by the autosave worker.
use async_trait::async_trait;

use landscape_core::{SaveReceipt, SaveRequest};

use super::errors::PersistError;

/// Stores a session's snapshot and applied actions somewhere durable.
///
/// Called at most once per `autosaving` entry; the coordinator guarantees no
/// two calls for the same session overlap.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    async fn save(&self, session: &str, request: SaveRequest) -> Result<SaveReceipt, PersistError>;
}
