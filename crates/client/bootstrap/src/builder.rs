//! Builds the session, oracles, and config bundle used by front-ends.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use landscape_content::ContentFactory;
use landscape_core::{Inventory, Quantity, Snapshot};
use landscape_runtime::{
    FileSnapshotRepo, OracleManager, RepositoryBackend, Session, SessionConfig, SystemClock,
};

use crate::config::CliConfig;
use crate::oracles::{ContentOracleFactory, OracleFactory};
use crate::saves;

/// Builder that assembles a session, its oracles, and configuration for clients.
pub struct SessionBootstrap {
    config: CliConfig,
    oracle_factory: Arc<dyn OracleFactory>,
}

impl SessionBootstrap {
    pub fn new(config: CliConfig) -> Self {
        let default_factory = ContentOracleFactory::new(config.content_dir.clone());
        Self {
            config,
            oracle_factory: Arc::new(default_factory),
        }
    }

    /// Provide a custom oracle factory (e.g. a prebuilt catalog in tests).
    pub fn oracle_factory(mut self, factory: impl OracleFactory + 'static) -> Self {
        self.oracle_factory = Arc::new(factory);
        self
    }

    pub async fn build(self) -> Result<SessionSetup> {
        let oracles = self.oracle_factory.build()?;
        let session_config = self.session_config()?;
        let initial = self.initial_snapshot()?;

        let mut builder = Session::builder()
            .config(session_config)
            .oracles(oracles.clone())
            .initial_state(initial.clone());

        if let Some(ref session_id) = self.config.session_id {
            builder = builder.session_id(session_id.clone());
        }

        if let Some(ref dir) = self.config.save_dir {
            let repo = FileSnapshotRepo::new(dir)
                .with_context(|| format!("opening save directory {}", dir.display()))?;
            builder = builder.persistence(Arc::new(RepositoryBackend::new(
                Arc::new(repo),
                Arc::new(SystemClock),
            )));
        }

        let session = builder.build().await?;
        tracing::info!(session = session.session_id(), "session started");

        Ok(SessionSetup {
            config: self.config,
            oracles,
            initial,
            session,
        })
    }

    /// `[session]` from the content config, with environment overrides.
    fn session_config(&self) -> Result<SessionConfig> {
        let content = ContentFactory::new(&self.config.content_dir);
        let mut session_config = if content.data_dir().join(ContentFactory::CONFIG_FILE).exists()
        {
            SessionConfig::from_factory(&content)?
        } else {
            SessionConfig::default()
        };

        if let Some(timeout) = self.config.autosave_timeout_ms {
            session_config.autosave_timeout_ms = Some(timeout);
        }
        Ok(session_config)
    }

    /// An explicit snapshot file wins, then the last save of the session,
    /// then an empty world.
    fn initial_snapshot(&self) -> Result<Snapshot> {
        if let Some(ref path) = self.config.snapshot_path {
            return load_snapshot(path);
        }

        if let (Some(dir), Some(session_id)) = (&self.config.save_dir, &self.config.session_id)
            && let Some(saved) = saves::load_save(dir, session_id)?
        {
            tracing::info!(
                session = %session_id,
                revision = saved.revision,
                "resuming saved session"
            );
            return Ok(saved.snapshot);
        }

        Ok(Snapshot::new(Quantity::ZERO, Inventory::new()))
    }
}

/// Read a snapshot from a JSON file and check its invariants.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    snapshot
        .check_invariants()
        .with_context(|| format!("snapshot {} is inconsistent", path.display()))?;
    Ok(snapshot)
}

pub struct SessionSetup {
    pub config: CliConfig,
    pub oracles: OracleManager,
    pub initial: Snapshot,
    pub session: Session,
}
