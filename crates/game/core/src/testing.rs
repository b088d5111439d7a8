//! Shared fixtures for unit tests.

use rust_decimal::Decimal;

use crate::config::GameConfig;
use crate::env::{CatalogSnapshot, Env, GameEnv, ItemDefinition};
use crate::ledger::Quantity;
use crate::state::{
    Coordinates, ItemName, ObjectId, PlaceableCategory, PlacedObject, Snapshot, Timestamp,
};

pub fn qty(value: i64) -> Quantity {
    Decimal::new(value, 0)
}

/// Small catalog covering every category and rule.
///
/// `Statue` declares `Wood` before `Stone` so ingredient checks can be seen
/// following declaration order rather than name order.
pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new()
        .with(
            ItemDefinition::new("Gnome", PlaceableCategory::Collectible)
                .with_cost(qty(40))
                .with_limit(qty(3))
                .with_dimensions(1, 1),
        )
        .with(
            ItemDefinition::new("Statue", PlaceableCategory::Collectible)
                .with_cost(qty(10))
                .with_ingredient("Wood", qty(2))
                .with_ingredient("Stone", qty(5))
                .with_dimensions(2, 2),
        )
        .with(
            ItemDefinition::new("Flag", PlaceableCategory::Collectible)
                .with_ingredient("Block Buck", qty(1))
                .with_dimensions(1, 1),
        )
        .with(
            ItemDefinition::new("Barn", PlaceableCategory::Building)
                .with_cost(qty(200))
                .with_dimensions(4, 3)
                .permanent(),
        )
        .with(ItemDefinition::new("Tree", PlaceableCategory::Resource).with_dimensions(2, 2))
        .with(ItemDefinition::new("Scroll", PlaceableCategory::Collectible).with_cost(qty(5)))
}

pub struct Fixture {
    pub catalog: CatalogSnapshot,
    pub config: GameConfig,
    pub now: Timestamp,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            catalog: catalog(),
            config: GameConfig::new(),
            now: Timestamp::ZERO,
        }
    }

    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.catalog, &self.config, self.now).into_game_env()
    }

    pub fn with_object(
        &self,
        mut snapshot: Snapshot,
        category: PlaceableCategory,
        name: &str,
        id: &str,
        coordinates: Coordinates,
    ) -> Snapshot {
        snapshot
            .placed
            .insert(
                category,
                &ItemName::from(name),
                PlacedObject::new(ObjectId::from(id), coordinates, self.now),
            )
            .expect("fixture ids are unique");
        snapshot
    }
}
