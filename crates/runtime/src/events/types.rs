//! Event types for different topics.

use landscape_core::{
    Action, AppliedAction, Coordinates, EconomicEvent, EditingState, ItemName, SaveReceipt,
    SavingState, TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events related to snapshot changes (applied and rejected actions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// An action passed every phase and replaced the snapshot
    ActionApplied {
        action: AppliedAction,
        events: Vec<EconomicEvent>,
    },

    /// An action was rejected; the snapshot is unchanged
    ActionRejected {
        action: Action,
        phase: TransitionPhase,
        error: String,
    },

    /// `PLACE` was withheld from the machine because the pending spot collides
    PlacementBlocked {
        name: ItemName,
        coordinates: Coordinates,
    },
}

/// Events describing how the placement machine reacted to input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowNotice {
    /// At least one region handled the event
    Transitioned {
        event: String,
        saving: SavingState,
        editing: EditingState,
    },

    /// No region had a transition for the event in its current state
    Ignored {
        event: String,
        saving: SavingState,
        editing: EditingState,
    },
}

/// Events related to the autosave lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AutosaveEvent {
    /// A persistence call was handed to the autosave worker
    Started { actions: usize },

    /// The backend stored the session
    Saved(SaveReceipt),

    /// The save failed; the session may retry with another `SAVE`
    Failed { reason: String },
}
