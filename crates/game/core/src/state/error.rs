//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemName, ObjectId};

/// Errors raised by snapshot mutators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("{name} already has an object with id {id}")]
    DuplicateObjectId { name: ItemName, id: ObjectId },

    #[error("no placed {name} with id {id}")]
    ObjectNotFound { name: ItemName, id: ObjectId },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateObjectId { .. } => "STATE_DUPLICATE_OBJECT_ID",
            Self::ObjectNotFound { .. } => "STATE_OBJECT_NOT_FOUND",
        }
    }
}

/// A snapshot that breaks one of the world invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("balance is negative: {0}")]
    NegativeBalance(crate::ledger::Quantity),

    #[error("inventory holds a negative quantity of {item}: {amount}")]
    NegativeInventory {
        item: ItemName,
        amount: crate::ledger::Quantity,
    },

    #[error("{name} holds duplicate object id {id}")]
    DuplicateObjectId { name: ItemName, id: ObjectId },
}
