//! Configuration loader.

use std::path::Path;

use landscape_core::GameConfig;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

/// Loader for configuration from TOML files.
///
/// Balance rules sit at the top level of the file; other components keep
/// their settings in a named table (for example `[session]`).
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the balance rules from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config: GameConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Load the `[section]` table of a TOML file.
    ///
    /// A missing table yields `T::default()`.
    pub fn load_section<T>(path: &Path, section: &str) -> LoadResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let content = read_file(path)?;
        Self::parse_section(&content, section)
    }

    pub fn parse_section<T>(source: &str, section: &str) -> LoadResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let mut table: toml::Table = toml::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        match table.remove(section) {
            Some(value) => value
                .try_into()
                .map_err(|e| anyhow::anyhow!("Invalid [{}] section: {}", section, e)),
            None => Ok(T::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_core::SpatialIndexKind;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Tuning {
        command_buffer: usize,
        id_length: usize,
    }

    #[test]
    fn bundled_config_selects_grid_index() {
        let config: GameConfig = toml::from_str(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(
            config.spatial_index,
            SpatialIndexKind::Grid { cell_size: 8 }
        );
        assert_eq!(config.premium_currency.as_str(), "Block Buck");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn reads_named_section() {
        let tuning: Tuning =
            ConfigLoader::parse_section(include_str!("../../data/config.toml"), "session").unwrap();
        assert_eq!(
            tuning,
            Tuning {
                command_buffer: 64,
                id_length: 8
            }
        );

        let absent: Tuning = ConfigLoader::parse_section("", "session").unwrap();
        assert_eq!(absent, Tuning::default());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "spend_activity = \"Gold Spent\"\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.spend_activity, "Gold Spent");
        assert_eq!(config.spatial_index, SpatialIndexKind::LinearScan);
    }
}
