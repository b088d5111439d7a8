//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use landscape_core::{CatalogSnapshot, GameConfig};
use serde::de::DeserializeOwned;

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── catalog.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const CATALOG_FILE: &'static str = "catalog.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance rules from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load a named table from `config.toml`.
    pub fn load_section<T>(&self, section: &str) -> LoadResult<T>
    where
        T: DeserializeOwned + Default,
    {
        ConfigLoader::load_section(&self.data_dir.join(Self::CONFIG_FILE), section)
    }

    /// Load the item catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        CatalogLoader::load(&self.data_dir.join(Self::CATALOG_FILE))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_bundled_data_dir() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));

        let catalog = factory.load_catalog().unwrap();
        let config = factory.load_config().unwrap();

        assert_eq!(catalog.len(), 10);
        assert_eq!(config.spend_activity, GameConfig::DEFAULT_SPEND_ACTIVITY);
    }
}
