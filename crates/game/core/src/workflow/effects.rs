use crate::action::{Action, AppliedAction};
use crate::state::{Snapshot, Timestamp};

/// Credentials forwarded untouched to the persistence boundary.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveCredentials {
    pub token: String,
    pub farm_id: u64,
}

/// Everything one save call ships: the snapshot and the actions that led to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveRequest {
    pub snapshot: Snapshot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<AppliedAction>,
    pub credentials: SaveCredentials,
}

/// Acknowledgement from the persistence boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveReceipt {
    /// Monotonic revision assigned by the store.
    pub revision: u64,
    pub saved_at: Timestamp,
    /// Number of actions the store accepted with this save.
    pub actions: usize,
}

/// Work the machine asks its driver to perform.
///
/// The machine never calls the reducer or the store itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Hand a committed action to the reducer.
    Dispatch(Action),
    /// Start the single in-flight save.
    Persist(SaveRequest),
    SaveCompleted(SaveReceipt),
    SaveFailed(String),
}
