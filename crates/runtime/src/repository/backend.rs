//! Persistence backend that writes through a [`SnapshotRepository`].

use std::sync::Arc;

use async_trait::async_trait;

use landscape_core::{SaveReceipt, SaveRequest};

use super::traits::SnapshotRepository;
use crate::api::{Clock, PersistError, PersistenceBackend};

pub struct RepositoryBackend<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RepositoryBackend<R>
where
    R: SnapshotRepository,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

#[async_trait]
impl<R> PersistenceBackend for RepositoryBackend<R>
where
    R: SnapshotRepository + 'static,
{
    async fn save(&self, session: &str, request: SaveRequest) -> Result<SaveReceipt, PersistError> {
        if request.credentials.token.is_empty() {
            return Err(PersistError::Backend("missing session token".to_owned()));
        }

        let revision = self
            .repository
            .save(session, &request.snapshot, &request.actions)?;

        Ok(SaveReceipt {
            revision,
            saved_at: self.clock.now(),
            actions: request.actions.len(),
        })
    }
}
