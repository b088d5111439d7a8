//! Logging to stderr and to a per-session file.
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_dir = log_directory().join(session_id.unwrap_or("anonymous"));
    std::fs::create_dir_all(&session_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the snapshot, so human-readable logs go to stderr.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking_file).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!(log_file = %session_dir.join("client.log").display(), "logging initialized");
    Ok(guard)
}

/// Platform cache directory, e.g. `~/.cache/landscape/logs` on Linux.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "landscape")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("landscape").join("logs"))
}
