//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use landscape_core::{AppliedAction, Snapshot};

use super::error::{RepositoryError, Result};
use super::traits::{SavedSession, SnapshotRepository};

/// Stores each session as `session_{id}.json`.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-save leaves the previous revision intact.
pub struct FileSnapshotRepo {
    base_dir: PathBuf,
}

impl FileSnapshotRepo {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, session: &str) -> Result<PathBuf> {
        let valid = !session.is_empty()
            && session
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidSessionId(session.to_owned()));
        }
        Ok(self.base_dir.join(format!("session_{session}.json")))
    }

    fn read(path: &Path) -> Result<Option<SavedSession>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        let saved = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {e}", path.display())))?;
        Ok(Some(saved))
    }
}

impl SnapshotRepository for FileSnapshotRepo {
    fn save(&self, session: &str, snapshot: &Snapshot, actions: &[AppliedAction]) -> Result<u64> {
        let path = self.session_path(session)?;
        let temp_path = path.with_extension("json.tmp");

        let next = SavedSession::advance(Self::read(&path)?, snapshot.clone(), actions);
        let bytes = serde_json::to_vec_pretty(&next)?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved session[{}] revision {} to {}",
            session,
            next.revision,
            path.display()
        );

        Ok(next.revision)
    }

    fn load(&self, session: &str) -> Result<Option<SavedSession>> {
        let path = self.session_path(session)?;
        let saved = Self::read(&path)?;
        if saved.is_some() {
            tracing::debug!("Loaded session[{}] from {}", session, path.display());
        }
        Ok(saved)
    }

    fn exists(&self, session: &str) -> bool {
        self.session_path(session)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, session: &str) -> Result<()> {
        let path = self.session_path(session)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", session);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("session_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                sessions.push(id.to_owned());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_core::{
        BuyDecorationAction, Coordinates, Inventory, Placement, Quantity, Timestamp,
    };
    use tempfile::TempDir;

    fn snapshot(balance: i64) -> Snapshot {
        Snapshot::new(
            Quantity::new(balance, 0),
            Inventory::new().with("Wood", Quantity::new(25, 1)),
        )
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let repo = FileSnapshotRepo::new(dir.path()).unwrap();
        let action = AppliedAction::new(
            BuyDecorationAction::placed("Gnome", Placement::new("a1b2", Coordinates::new(3, -1)))
                .into(),
            Timestamp::from_millis(1_700_000_000_000),
        );

        let revision = repo.save("farm-1", &snapshot(60), &[action.clone()]).unwrap();
        assert_eq!(revision, 1);

        let reopened = FileSnapshotRepo::new(dir.path()).unwrap();
        let saved = reopened.load("farm-1").unwrap().unwrap();
        assert_eq!(saved.snapshot, snapshot(60));
        assert_eq!(saved.actions, vec![action]);
        assert!(!dir.path().join("session_farm-1.json.tmp").exists());
    }

    #[test]
    fn revisions_accumulate() {
        let dir = TempDir::new().unwrap();
        let repo = FileSnapshotRepo::new(dir.path()).unwrap();

        repo.save("farm", &snapshot(10), &[]).unwrap();
        repo.save("farm", &snapshot(20), &[]).unwrap();

        assert_eq!(repo.revision("farm").unwrap(), 2);
        assert_eq!(repo.list_sessions().unwrap(), vec!["farm"]);
    }

    #[test]
    fn rejects_path_like_session_ids() {
        let dir = TempDir::new().unwrap();
        let repo = FileSnapshotRepo::new(dir.path()).unwrap();

        let error = repo.save("../escape", &snapshot(1), &[]).unwrap_err();
        assert!(matches!(error, RepositoryError::InvalidSessionId(_)));
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let repo = FileSnapshotRepo::new(dir.path()).unwrap();
        fs::write(dir.path().join("session_bad.json"), b"{ not json").unwrap();

        let error = repo.load("bad").unwrap_err();
        assert!(matches!(error, RepositoryError::CorruptedData(_)));
    }
}
