//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use landscape_core::{AppliedAction, Snapshot};

use super::error::{RepositoryError, Result};
use super::traits::{SavedSession, SnapshotRepository};

/// In-memory implementation of SnapshotRepository.
pub struct InMemorySnapshotRepo {
    sessions: RwLock<HashMap<String, SavedSession>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySnapshotRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, session: &str, snapshot: &Snapshot, actions: &[AppliedAction]) -> Result<u64> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let next = SavedSession::advance(sessions.remove(session), snapshot.clone(), actions);
        let revision = next.revision;
        sessions.insert(session.to_owned(), next);
        Ok(revision)
    }

    fn load(&self, session: &str) -> Result<Option<SavedSession>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(session).cloned())
    }

    fn exists(&self, session: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(session))
            .unwrap_or(false)
    }

    fn delete(&self, session: &str) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(session);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_core::{BuyDecorationAction, Inventory, Quantity, Timestamp};

    fn applied(name: &str, at: u64) -> AppliedAction {
        AppliedAction::new(
            BuyDecorationAction::new(name).into(),
            Timestamp::from_millis(at),
        )
    }

    #[test]
    fn saves_append_to_the_action_stream() {
        let repo = InMemorySnapshotRepo::new();
        let first = Snapshot::new(Quantity::from(90), Inventory::new());
        let second = Snapshot::new(Quantity::from(80), Inventory::new());

        assert_eq!(repo.save("farm", &first, &[applied("Gnome", 1)]).unwrap(), 1);
        assert_eq!(repo.save("farm", &second, &[applied("Flag", 2)]).unwrap(), 2);

        let saved = repo.load("farm").unwrap().unwrap();
        assert_eq!(saved.revision, 2);
        assert_eq!(saved.snapshot, second);
        assert_eq!(saved.actions, vec![applied("Gnome", 1), applied("Flag", 2)]);
    }

    #[test]
    fn missing_session_has_revision_zero() {
        let repo = InMemorySnapshotRepo::new();
        assert_eq!(repo.revision("nobody").unwrap(), 0);
        assert!(repo.load("nobody").unwrap().is_none());
        assert!(!repo.exists("nobody"));
    }

    #[test]
    fn delete_and_list() {
        let repo = InMemorySnapshotRepo::new();
        repo.save("b", &Snapshot::default(), &[]).unwrap();
        repo.save("a", &Snapshot::default(), &[]).unwrap();
        assert_eq!(repo.list_sessions().unwrap(), vec!["a", "b"]);

        repo.delete("a").unwrap();
        assert_eq!(repo.list_sessions().unwrap(), vec!["b"]);
    }
}
