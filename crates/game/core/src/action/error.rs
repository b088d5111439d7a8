//! Action validation errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::ledger::{LedgerError, Quantity};
use crate::state::{Coordinates, InvariantViolation, ItemName, ObjectId, ObjectRef, StateError};

/// Why an action was rejected.
///
/// Every variant leaves the input snapshot untouched: the engine only
/// publishes a new snapshot after every phase succeeded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("{name} is not in the catalog")]
    UnknownItem { name: ItemName },

    #[error("no bumpkin to act")]
    MissingActor,

    #[error("insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: Quantity, need: Quantity },

    #[error("{name} limit of {limit} reached")]
    LimitReached { name: ItemName, limit: Quantity },

    #[error("insufficient ingredient {ingredient}: have {have}, need {need}")]
    InsufficientIngredient {
        ingredient: ItemName,
        have: Quantity,
        need: Quantity,
    },

    #[error("{name} at {coordinates} collides with {blocked_by}")]
    CollisionDetected {
        name: ItemName,
        coordinates: Coordinates,
        blocked_by: ObjectRef,
    },

    #[error("{name} already has an object with id {id}")]
    DuplicateId { name: ItemName, id: ObjectId },

    #[error("no placed {name} with id {id}")]
    ObjectNotFound { name: ItemName, id: ObjectId },

    #[error("{name} has no footprint and cannot be placed")]
    NotPlaceable { name: ItemName },

    #[error("every {name} in the inventory is already placed")]
    NothingToPlace { name: ItemName },

    #[error("{name} cannot be removed")]
    RemovalRestricted { name: ItemName },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invariant violated: {0}")]
    InvariantViolated(#[from] InvariantViolation),
}

impl From<StateError> for ActionError {
    fn from(error: StateError) -> Self {
        match error {
            StateError::DuplicateObjectId { name, id } => Self::DuplicateId { name, id },
            StateError::ObjectNotFound { name, id } => Self::ObjectNotFound { name, id },
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            Self::Ledger(_) | Self::InvariantViolated(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem { .. } => "ACTION_UNKNOWN_ITEM",
            Self::MissingActor => "ACTION_MISSING_ACTOR",
            Self::InsufficientFunds { .. } => "ACTION_INSUFFICIENT_FUNDS",
            Self::LimitReached { .. } => "ACTION_LIMIT_REACHED",
            Self::InsufficientIngredient { .. } => "ACTION_INSUFFICIENT_INGREDIENT",
            Self::CollisionDetected { .. } => "ACTION_COLLISION_DETECTED",
            Self::DuplicateId { .. } => "ACTION_DUPLICATE_ID",
            Self::ObjectNotFound { .. } => "ACTION_OBJECT_NOT_FOUND",
            Self::NotPlaceable { .. } => "ACTION_NOT_PLACEABLE",
            Self::NothingToPlace { .. } => "ACTION_NOTHING_TO_PLACE",
            Self::RemovalRestricted { .. } => "ACTION_REMOVAL_RESTRICTED",
            Self::Oracle(error) => error.error_code(),
            Self::Ledger(error) => error.error_code(),
            Self::InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
