use std::collections::BTreeMap;

use crate::ledger::Quantity;
use crate::state::{ItemName, PlaceableCategory};

/// Read-only item catalog. The core never writes to it.
pub trait CatalogOracle: Send + Sync {
    fn definition(&self, name: &ItemName) -> Option<&ItemDefinition>;

    /// Grid footprint of a kind, if it can be placed.
    fn dimensions(&self, name: &ItemName) -> Option<Dimensions> {
        self.definition(name).and_then(|item| item.dimensions)
    }
}

/// Width and height of a footprint, in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One required ingredient.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ingredient {
    pub item: ItemName,
    pub amount: Quantity,
}

impl Ingredient {
    pub fn new(item: impl Into<ItemName>, amount: Quantity) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// Catalog entry for a placeable kind.
///
/// `ingredients` is an ordered list: shortfalls are reported for the first
/// short ingredient in declaration order, so the order is part of the
/// catalog's contract.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: ItemName,
    pub category: PlaceableCategory,

    /// Ledger cost; zero when the item is paid for in ingredients only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Quantity,

    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Vec<Ingredient>,

    /// Maximum number a player may hold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub limit: Option<Quantity>,

    /// Grid footprint. Kinds without one cannot be placed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dimensions: Option<Dimensions>,

    #[cfg_attr(feature = "serde", serde(default = "removable_by_default"))]
    pub removable: bool,
}

#[cfg(feature = "serde")]
fn removable_by_default() -> bool {
    true
}

impl ItemDefinition {
    pub fn new(name: impl Into<ItemName>, category: PlaceableCategory) -> Self {
        Self {
            name: name.into(),
            category,
            cost: Quantity::ZERO,
            ingredients: Vec::new(),
            limit: None,
            dimensions: None,
            removable: true,
        }
    }

    pub fn with_cost(mut self, cost: Quantity) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_ingredient(mut self, item: impl Into<ItemName>, amount: Quantity) -> Self {
        self.ingredients.push(Ingredient::new(item, amount));
        self
    }

    pub fn with_limit(mut self, limit: Quantity) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Dimensions::new(width, height));
        self
    }

    pub fn permanent(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Amount of `item` this entry consumes, if it is an ingredient.
    pub fn ingredient(&self, item: &ItemName) -> Option<Quantity> {
        self.ingredients
            .iter()
            .find(|ingredient| &ingredient.item == item)
            .map(|ingredient| ingredient.amount)
    }
}

/// In-memory catalog keyed by item name.
///
/// Used by the runtime, by replays, and by tests.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    items: BTreeMap<ItemName, ItemDefinition>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a definition.
    pub fn insert(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.name.clone(), definition);
    }

    pub fn with(mut self, definition: ItemDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

impl FromIterator<ItemDefinition> for CatalogSnapshot {
    fn from_iter<T: IntoIterator<Item = ItemDefinition>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn definition(&self, name: &ItemName) -> Option<&ItemDefinition> {
        self.items.get(name)
    }
}
