//! Headless client entry point.
//!
//! Loads a snapshot and a script of UI events, replays them through a
//! session, and prints the final snapshot as JSON on stdout.
mod app;
mod consumer;
mod logging;

use anyhow::Result;
use app::CliApp;
use landscape_bootstrap::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::init(config.session_id.as_deref())?;

    let output = CliApp::builder(config).build().await?.run().await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
