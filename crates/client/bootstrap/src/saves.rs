//! Save-file utilities for resuming sessions.

use std::path::Path;

use anyhow::{Context, Result};

use landscape_core::Timestamp;
use landscape_runtime::{FileSnapshotRepo, SavedSession, SnapshotRepository};

/// Information about a saved session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    pub session_id: String,

    /// Number of successful saves.
    pub revision: u64,

    /// Length of the recorded action stream.
    pub actions: usize,

    /// When the last recorded action was applied.
    pub last_applied: Option<Timestamp>,
}

/// List every session stored under `save_dir`, most recently active first.
pub fn list_saves(save_dir: &Path) -> Result<Vec<SaveInfo>> {
    if !save_dir.exists() {
        return Ok(Vec::new());
    }

    let repo = open(save_dir)?;
    let mut saves = Vec::new();

    for session_id in repo.list_sessions()? {
        let Some(saved) = repo.load(&session_id)? else {
            continue;
        };
        saves.push(SaveInfo {
            revision: saved.revision,
            actions: saved.actions.len(),
            last_applied: saved.actions.last().map(|applied| applied.applied_at),
            session_id,
        });
    }

    saves.sort_by(|a, b| {
        b.last_applied
            .cmp(&a.last_applied)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });

    Ok(saves)
}

/// Load one saved session, or `None` if it was never saved.
pub fn load_save(save_dir: &Path, session_id: &str) -> Result<Option<SavedSession>> {
    if !save_dir.exists() {
        return Ok(None);
    }
    open(save_dir)?
        .load(session_id)
        .with_context(|| format!("loading session {session_id}"))
}

fn open(save_dir: &Path) -> Result<FileSnapshotRepo> {
    FileSnapshotRepo::new(save_dir)
        .with_context(|| format!("opening save directory {}", save_dir.display()))
}
