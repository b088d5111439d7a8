//! Repository contracts for saving and loading player sessions.

use serde::{Deserialize, Serialize};

use landscape_core::{AppliedAction, Snapshot};

use super::error::Result;

/// What a session looks like at rest: the latest snapshot plus every action
/// applied since the session's first save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Incremented on every successful save, starting at 1.
    pub revision: u64,
    pub snapshot: Snapshot,
    #[serde(default)]
    pub actions: Vec<AppliedAction>,
}

impl SavedSession {
    /// Next revision after appending `actions` and replacing the snapshot.
    pub fn advance(previous: Option<Self>, snapshot: Snapshot, actions: &[AppliedAction]) -> Self {
        match previous {
            Some(mut session) => {
                session.revision += 1;
                session.snapshot = snapshot;
                session.actions.extend_from_slice(actions);
                session
            }
            None => Self {
                revision: 1,
                snapshot,
                actions: actions.to_vec(),
            },
        }
    }
}

/// Repository for player session persistence.
///
/// Each save replaces the stored snapshot and appends to the action stream,
/// so the stream can be replayed against an earlier snapshot.
pub trait SnapshotRepository: Send + Sync {
    /// Store `snapshot` and append `actions`. Returns the new revision.
    fn save(&self, session: &str, snapshot: &Snapshot, actions: &[AppliedAction]) -> Result<u64>;

    fn load(&self, session: &str) -> Result<Option<SavedSession>>;

    fn exists(&self, session: &str) -> bool;

    fn delete(&self, session: &str) -> Result<()>;

    /// List stored session ids in ascending order.
    fn list_sessions(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }

    /// Revision of the stored session, or 0 when nothing was saved yet.
    fn revision(&self, session: &str) -> Result<u64> {
        Ok(self.load(session)?.map_or(0, |saved| saved.revision))
    }
}
