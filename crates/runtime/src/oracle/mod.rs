//! Runtime wrapper around static game content.
//!
//! The catalog and balance configuration are immutable once a session starts.
//! [`OracleManager`] shares them between workers and builds
//! [`landscape_core::Env`] values on demand, stamped with the clock reading
//! for the action about to run.
use std::sync::Arc;

use landscape_content::{ContentFactory, LoadResult};
use landscape_core::{CatalogSnapshot, Env, GameConfig, GameEnv, Timestamp};

/// Shared read-only content for one session.
#[derive(Clone, Debug)]
pub struct OracleManager {
    pub(crate) catalog: Arc<CatalogSnapshot>,
    pub(crate) config: Arc<GameConfig>,
}

impl OracleManager {
    pub fn new(catalog: CatalogSnapshot, config: GameConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Loads the catalog and configuration from a content directory.
    pub fn from_factory(factory: &ContentFactory) -> LoadResult<Self> {
        Ok(Self::new(factory.load_catalog()?, factory.load_config()?))
    }

    /// Converts the oracles into the environment the reducers take.
    pub fn as_game_env(&self, now: Timestamp) -> GameEnv<'_> {
        Env::with_all(self.catalog.as_ref(), self.config.as_ref(), now).into_game_env()
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
