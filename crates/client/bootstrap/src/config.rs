//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap a session from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding `catalog.ron` and `config.toml`.
    pub content_dir: PathBuf,
    /// JSON snapshot to start from.
    pub snapshot_path: Option<PathBuf>,
    /// JSON script of steps to replay.
    pub script_path: Option<PathBuf>,
    /// Directory for saved sessions. In-memory persistence when unset.
    pub save_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Overrides `autosave_timeout_ms` from `config.toml`.
    pub autosave_timeout_ms: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            snapshot_path: None,
            script_path: None,
            save_dir: None,
            session_id: None,
            autosave_timeout_ms: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LANDSCAPE_CATALOG` - Content directory (default: bundled content data)
    /// - `LANDSCAPE_SNAPSHOT` - Snapshot JSON to start from (default: resume or empty)
    /// - `LANDSCAPE_SCRIPT` - Script JSON to replay (default: none)
    /// - `LANDSCAPE_SAVE_DIR` - Directory for save files (default: in-memory)
    /// - `LANDSCAPE_SESSION_ID` - Session identifier for save files (default: random)
    /// - `LANDSCAPE_AUTOSAVE_TIMEOUT_MS` - Persistence call limit (default: from config.toml)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_var(&lookup, "LANDSCAPE_CATALOG") {
            config.content_dir = PathBuf::from(dir);
        }
        config.snapshot_path = read_var(&lookup, "LANDSCAPE_SNAPSHOT").map(PathBuf::from);
        config.script_path = read_var(&lookup, "LANDSCAPE_SCRIPT").map(PathBuf::from);
        config.save_dir = read_var(&lookup, "LANDSCAPE_SAVE_DIR").map(PathBuf::from);
        config.session_id = read_var(&lookup, "LANDSCAPE_SESSION_ID");
        config.autosave_timeout_ms = read_var(&lookup, "LANDSCAPE_AUTOSAVE_TIMEOUT_MS")
            .and_then(|value| value.parse().ok());

        config
    }
}

fn read_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Locates the bundled content directory.
///
/// Tries, in order, a path relative to the current executable (installed
/// layout) and then the current directory (development layout).
pub fn default_content_dir() -> PathBuf {
    const RELATIVE: &str = "crates/game/content/data";

    let beside_exe = env::current_exe().ok().and_then(|exe| {
        exe.ancestors()
            .map(|dir| dir.join(RELATIVE))
            .find(|candidate| candidate.is_dir())
    });

    beside_exe.unwrap_or_else(|| {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(RELATIVE)
    })
}
