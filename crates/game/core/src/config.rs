use crate::state::ItemName;

/// Game-balance configuration consumed by the reducers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ingredient treated as premium currency. Spending it is reported to
    /// the analytics boundary.
    pub premium_currency: ItemName,

    /// Activity counter that accumulates every ledger debit.
    pub spend_activity: String,

    /// Spatial index used for collision checks.
    pub spatial_index: SpatialIndexKind,
}

/// Strategy used to answer collision queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpatialIndexKind {
    /// Scan every placed object. Linear in the number of placed objects.
    #[default]
    LinearScan,

    /// Bucket placed objects into square cells of the given size.
    Grid { cell_size: u32 },
}

impl GameConfig {
    pub const DEFAULT_PREMIUM_CURRENCY: &'static str = "Block Buck";
    pub const DEFAULT_SPEND_ACTIVITY: &'static str = "Coins Spent";
    pub const DEFAULT_GRID_CELL: u32 = 8;

    pub fn new() -> Self {
        Self {
            premium_currency: ItemName::from(Self::DEFAULT_PREMIUM_CURRENCY),
            spend_activity: Self::DEFAULT_SPEND_ACTIVITY.to_owned(),
            spatial_index: SpatialIndexKind::default(),
        }
    }

    pub fn with_spatial_index(mut self, spatial_index: SpatialIndexKind) -> Self {
        self.spatial_index = spatial_index;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
