//! Helpers for constructing the oracles consumed by a session.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use landscape_content::ContentFactory;
use landscape_runtime::OracleManager;

pub trait OracleFactory: Send + Sync {
    fn build(&self) -> Result<OracleManager>;
}

/// Oracle factory that loads game content from data files.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── catalog.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentOracleFactory {
    data_dir: PathBuf,
}

impl ContentOracleFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl OracleFactory for ContentOracleFactory {
    fn build(&self) -> Result<OracleManager> {
        if !self.data_dir.is_dir() {
            bail!(
                "content data directory not found: {} (set LANDSCAPE_CATALOG to override)",
                self.data_dir.display()
            );
        }

        let factory = ContentFactory::new(&self.data_dir);
        let oracles = OracleManager::from_factory(&factory)
            .with_context(|| format!("loading content from {}", self.data_dir.display()))?;

        tracing::info!(
            items = oracles.catalog().len(),
            dir = %self.data_dir.display(),
            "content loaded"
        );
        Ok(oracles)
    }
}

impl OracleFactory for OracleManager {
    fn build(&self) -> Result<OracleManager> {
        Ok(self.clone())
    }
}
