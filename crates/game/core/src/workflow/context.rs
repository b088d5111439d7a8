use crate::action::ActionTag;
use crate::env::{Ingredient, ItemDefinition};
use crate::ledger::Quantity;
use crate::state::{Coordinates, ItemName, ObjectRef};

/// What the player is about to pay for the selected item.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirements {
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Quantity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Vec<Ingredient>,
}

impl Requirements {
    pub fn of(definition: &ItemDefinition) -> Self {
        Self {
            cost: definition.cost,
            ingredients: definition.ingredients.clone(),
        }
    }
}

/// Item chosen for placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub name: ItemName,

    #[cfg_attr(feature = "serde", serde(default))]
    pub action: ActionTag,

    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,

    /// Keep placing after each commit when a next slot is offered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub multiple: bool,

    /// Placements left in this session, if capped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub maximum: Option<u32>,
}

impl Selection {
    pub fn new(name: impl Into<ItemName>, action: ActionTag) -> Self {
        Self {
            name: name.into(),
            action,
            requirements: Requirements::default(),
            multiple: false,
            maximum: None,
        }
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn multiple(mut self, maximum: Option<u32>) -> Self {
        self.multiple = true;
        self.maximum = maximum;
        self
    }
}

/// Transient placement-session data. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkflowContext {
    pub selection: Option<Selection>,

    /// Pending placement position.
    pub coordinates: Coordinates,

    /// Live collision flag supplied by the caller with each update.
    pub collision_detected: bool,

    /// Slot offered for the next placement in a multi-placement run.
    pub origin: Option<Coordinates>,

    /// Placed object currently grabbed.
    pub moving: Option<ObjectRef>,
}

impl WorkflowContext {
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }
}
