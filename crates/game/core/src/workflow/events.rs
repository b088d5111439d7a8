use crate::state::{Coordinates, ItemName, ObjectId};

use super::{SaveReceipt, SaveRequest, Selection};

/// Discrete input delivered to the workflow machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum WorkflowEvent {
    Select(Selection),
    Update {
        coordinates: Coordinates,
        #[cfg_attr(feature = "serde", serde(default))]
        collision_detected: bool,
    },
    Place {
        #[cfg_attr(feature = "serde", serde(default))]
        next_origin: Option<Coordinates>,
        #[cfg_attr(feature = "serde", serde(default))]
        next_will_collide: bool,
    },
    Drag,
    Drop,
    Move {
        name: ItemName,
        id: ObjectId,
    },
    Blur,
    Remove {
        name: ItemName,
        id: ObjectId,
    },
    Build,
    Cancel,
    Back,
    Save(SaveRequest),
    SaveSucceeded(SaveReceipt),
    SaveFailed {
        reason: String,
    },
}

impl WorkflowEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Update { .. } => "UPDATE",
            Self::Place { .. } => "PLACE",
            Self::Drag => "DRAG",
            Self::Drop => "DROP",
            Self::Move { .. } => "MOVE",
            Self::Blur => "BLUR",
            Self::Remove { .. } => "REMOVE",
            Self::Build => "BUILD",
            Self::Cancel => "CANCEL",
            Self::Back => "BACK",
            Self::Save(_) => "SAVE",
            Self::SaveSucceeded(_) => "SAVE_SUCCEEDED",
            Self::SaveFailed { .. } => "SAVE_FAILED",
        }
    }
}
