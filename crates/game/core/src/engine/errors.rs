//! Error types for the action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, BuyDecorationAction, ConstructBuildingAction,
    CraftCollectibleAction, MoveAction, PlaceAction, RemoveAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while applying an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("buy decoration failed: {0}")]
    BuyDecoration(TransitionPhaseError<<BuyDecorationAction as ActionTransition>::Error>),

    #[error("craft collectible failed: {0}")]
    CraftCollectible(TransitionPhaseError<<CraftCollectibleAction as ActionTransition>::Error>),

    #[error("construct building failed: {0}")]
    ConstructBuilding(TransitionPhaseError<<ConstructBuildingAction as ActionTransition>::Error>),

    #[error("place failed: {0}")]
    Place(TransitionPhaseError<<PlaceAction as ActionTransition>::Error>),

    #[error("move failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("remove failed: {0}")]
    Remove(TransitionPhaseError<<RemoveAction as ActionTransition>::Error>),
}

impl ExecuteError {
    fn inner(&self) -> &TransitionPhaseError<ActionError> {
        match self {
            Self::BuyDecoration(inner)
            | Self::CraftCollectible(inner)
            | Self::ConstructBuilding(inner)
            | Self::Place(inner)
            | Self::Move(inner)
            | Self::Remove(inner) => inner,
        }
    }

    /// Phase that rejected the action.
    pub fn phase(&self) -> TransitionPhase {
        self.inner().phase
    }

    /// Underlying rejection reason.
    pub fn reason(&self) -> &ActionError {
        &self.inner().error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.reason().severity()
    }

    fn error_code(&self) -> &'static str {
        self.reason().error_code()
    }
}
