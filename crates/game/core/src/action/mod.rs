//! Actions that mutate a [`Snapshot`](crate::state::Snapshot).
//!
//! Each variant wraps a dedicated transition type so the engine can drive it
//! through the same pre-validate, apply, post-validate pipeline.
mod acquire;
mod economy;
mod error;
mod kinds;
mod transition;

pub use economy::EconomicEvent;
pub use error::ActionError;
pub use kinds::{
    BuyDecorationAction, ConstructBuildingAction, CraftCollectibleAction, MoveAction, PlaceAction,
    RemoveAction,
};
pub use transition::ActionTransition;

use crate::state::{Coordinates, ItemName, ObjectId, Timestamp};

/// Where a new object lands and the id it is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub id: ObjectId,
    pub coordinates: Coordinates,
}

impl Placement {
    pub fn new(id: impl Into<ObjectId>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            coordinates,
        }
    }
}

/// Every action the reducer understands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Action {
    #[cfg_attr(feature = "serde", serde(rename = "decoration.bought"))]
    BuyDecoration(BuyDecorationAction),

    #[cfg_attr(feature = "serde", serde(rename = "collectible.crafted"))]
    CraftCollectible(CraftCollectibleAction),

    #[cfg_attr(feature = "serde", serde(rename = "building.constructed"))]
    ConstructBuilding(ConstructBuildingAction),

    #[cfg_attr(feature = "serde", serde(rename = "item.placed"))]
    Place(PlaceAction),

    #[cfg_attr(feature = "serde", serde(rename = "item.moved"))]
    Move(MoveAction),

    #[cfg_attr(feature = "serde", serde(rename = "item.removed"))]
    Remove(RemoveAction),
}

impl Action {
    /// Wire name of the action, also used as a log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyDecoration(_) => "decoration.bought",
            Self::CraftCollectible(_) => "collectible.crafted",
            Self::ConstructBuilding(_) => "building.constructed",
            Self::Place(_) => "item.placed",
            Self::Move(_) => "item.moved",
            Self::Remove(_) => "item.removed",
        }
    }

    /// Item kind the action operates on.
    pub fn item(&self) -> &ItemName {
        match self {
            Self::BuyDecoration(action) => &action.name,
            Self::CraftCollectible(action) => &action.name,
            Self::ConstructBuilding(action) => &action.name,
            Self::Place(action) => &action.name,
            Self::Move(action) => &action.name,
            Self::Remove(action) => &action.name,
        }
    }
}

impl From<BuyDecorationAction> for Action {
    fn from(action: BuyDecorationAction) -> Self {
        Self::BuyDecoration(action)
    }
}

impl From<CraftCollectibleAction> for Action {
    fn from(action: CraftCollectibleAction) -> Self {
        Self::CraftCollectible(action)
    }
}

impl From<ConstructBuildingAction> for Action {
    fn from(action: ConstructBuildingAction) -> Self {
        Self::ConstructBuilding(action)
    }
}

impl From<PlaceAction> for Action {
    fn from(action: PlaceAction) -> Self {
        Self::Place(action)
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<RemoveAction> for Action {
    fn from(action: RemoveAction) -> Self {
        Self::Remove(action)
    }
}

/// Which action a placement session commits when the object is dropped.
///
/// One-shot tags end the session after a single commit; `Place` keeps going
/// while the player has more of the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionTag {
    #[default]
    Place,
    BuyDecoration,
    CraftCollectible,
    ConstructBuilding,
}

impl ActionTag {
    pub fn is_one_shot(self) -> bool {
        !matches!(self, Self::Place)
    }

    /// Builds the action committing `name` at `placement`.
    pub fn into_action(self, name: ItemName, placement: Placement) -> Action {
        match self {
            Self::Place => PlaceAction::new(name, placement).into(),
            Self::BuyDecoration => BuyDecorationAction::placed(name, placement).into(),
            Self::CraftCollectible => CraftCollectibleAction::placed(name, placement).into(),
            Self::ConstructBuilding => ConstructBuildingAction::new(name, placement).into(),
        }
    }
}

/// An action together with the instant it was applied.
///
/// Replaying a stream of these against the snapshot it started from yields
/// the same final snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedAction {
    pub action: Action,
    pub applied_at: Timestamp,
}

impl AppliedAction {
    pub fn new(action: Action, applied_at: Timestamp) -> Self {
        Self { action, applied_at }
    }
}

/// Runs the world invariants as a post-condition.
pub(crate) fn ensure_invariants(state: &crate::state::Snapshot) -> Result<(), ActionError> {
    state.check_invariants().map_err(ActionError::from)
}
