//! Autosave worker that runs the persistence boundary off the session loop.
//!
//! The session worker hands requests over through [`AutosaveCoordinator`],
//! which refuses a second request while one is still in flight. Results go
//! back to the session as [`Command::SaveFinished`] so they are processed in
//! order with every other command.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use landscape_core::{SaveReceipt, SaveRequest};

use super::session::Command;
use crate::api::{PersistError, PersistenceBackend};

/// Submission side of the autosave worker. Owned by the session worker.
pub(crate) struct AutosaveCoordinator {
    job_tx: mpsc::Sender<SaveRequest>,
    busy: Arc<AtomicBool>,
}

impl AutosaveCoordinator {
    /// Hands `request` to the worker unless a save is already running.
    pub(crate) fn submit(&self, request: SaveRequest) -> Result<(), PersistError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PersistError::Busy);
        }

        if self.job_tx.try_send(request).is_err() {
            self.busy.store(false, Ordering::Release);
            return Err(PersistError::Unavailable);
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Background task that performs one persistence call at a time.
pub(crate) struct AutosaveWorker {
    session_id: String,
    backend: Arc<dyn PersistenceBackend>,
    timeout: Option<Duration>,
    job_rx: mpsc::Receiver<SaveRequest>,
    busy: Arc<AtomicBool>,
    // Weak so that dropping every handle still shuts the session down.
    results: mpsc::WeakSender<Command>,
}

impl AutosaveWorker {
    pub(crate) fn new(
        session_id: String,
        backend: Arc<dyn PersistenceBackend>,
        timeout: Option<Duration>,
        results: mpsc::WeakSender<Command>,
    ) -> (Self, AutosaveCoordinator) {
        let (job_tx, job_rx) = mpsc::channel(1);
        let busy = Arc::new(AtomicBool::new(false));

        let worker = Self {
            session_id,
            backend,
            timeout,
            job_rx,
            busy: Arc::clone(&busy),
            results,
        };
        (worker, AutosaveCoordinator { job_tx, busy })
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                Some(request) = self.job_rx.recv() => {
                    let result = self.persist(request).await;
                    // Cleared before reporting so the session can retry as
                    // soon as it sees the result.
                    self.busy.store(false, Ordering::Release);
                    self.report(result).await;
                }
                else => break,
            }
        }
        debug!(target: "runtime::autosave", session = %self.session_id, "autosave worker stopped");
    }

    async fn persist(&self, request: SaveRequest) -> Result<SaveReceipt, PersistError> {
        let save = self.backend.save(&self.session_id, request);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, save).await.map_err(|_| {
                PersistError::Timeout {
                    after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })?,
            None => save.await,
        }
    }

    async fn report(&self, result: Result<SaveReceipt, PersistError>) {
        let Some(results) = self.results.upgrade() else {
            warn!(
                target: "runtime::autosave",
                session = %self.session_id,
                "session closed before the save result could be delivered"
            );
            return;
        };
        if results.send(Command::SaveFinished { result }).await.is_err() {
            debug!(target: "runtime::autosave", "SaveFinished dropped (session worker gone)");
        }
    }
}
