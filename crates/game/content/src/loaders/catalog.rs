//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use landscape_core::{CatalogSnapshot, ItemDefinition, Quantity};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON source.
    ///
    /// Rejects duplicate names and negative quantities so a bad data file
    /// fails at load time instead of surfacing as odd reducer results.
    pub fn parse(source: &str) -> LoadResult<CatalogSnapshot> {
        let file: CatalogFile = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for item in &file.items {
            if !seen.insert(&item.name) {
                anyhow::bail!("duplicate catalog entry {}", item.name);
            }
            if item.cost < Quantity::ZERO {
                anyhow::bail!("{} has a negative cost", item.name);
            }
            if let Some(ingredient) = item
                .ingredients
                .iter()
                .find(|ingredient| ingredient.amount < Quantity::ZERO)
            {
                anyhow::bail!(
                    "{} requires a negative amount of {}",
                    item.name,
                    ingredient.item
                );
            }
        }

        Ok(file.items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_core::{CatalogOracle, Dimensions, ItemName, PlaceableCategory};
    use std::str::FromStr;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = CatalogLoader::parse(include_str!("../../data/catalog.ron"))
            .expect("bundled catalog is valid");

        let well = catalog
            .definition(&ItemName::from("Water Well"))
            .expect("Water Well is defined");
        assert_eq!(well.category, PlaceableCategory::Building);
        assert_eq!(well.dimensions, Some(Dimensions::new(2, 2)));
        let order: Vec<_> = well
            .ingredients
            .iter()
            .map(|ingredient| ingredient.item.as_str())
            .collect();
        assert_eq!(order, ["Wood", "Stone"]);

        let town = catalog
            .definition(&ItemName::from("Town Center"))
            .expect("Town Center is defined");
        assert!(!town.removable);

        let bench = catalog
            .definition(&ItemName::from("Wooden Bench"))
            .expect("Wooden Bench is defined");
        assert_eq!(bench.cost, Quantity::from_str("2.5").unwrap());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let source = r#"(
            items: [
                (name: "Gnome", category: collectible),
                (name: "Gnome", category: building),
            ],
        )"#;

        let error = CatalogLoader::parse(source).unwrap_err();
        assert!(error.to_string().contains("duplicate"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = CatalogLoader::load(&dir.path().join("missing.ron")).unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }
}
