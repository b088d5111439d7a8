//! Values the session hands back to its callers.
use serde::{Deserialize, Serialize};

use landscape_core::{Action, AppliedAction, ExecuteError, LandscapingMachine};

/// What one workflow event did to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Some region of the machine had a transition for the event.
    pub handled: bool,

    /// `PLACE` was withheld because the pending spot collides.
    pub blocked: bool,

    /// Commit actions the reducer accepted, in order.
    pub applied: Vec<AppliedAction>,

    /// Commit actions the reducer rejected. The snapshot is unchanged for
    /// each of them.
    pub rejected: Vec<(Action, ExecuteError)>,

    /// A persistence call was handed to the autosave worker.
    pub save_started: bool,
}

/// Read-only view of the session published after every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub machine: LandscapingMachine,

    /// Actions applied since the session started.
    pub applied: u64,

    /// Applied actions not yet covered by a successful save.
    pub unsaved: usize,

    /// Revision of the last successful save, 0 before the first.
    pub revision: u64,
}
