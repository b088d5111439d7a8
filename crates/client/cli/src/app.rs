//! Glue code tying the bootstrap, session, and script runner together.
use anyhow::Result;
use serde::Serialize;

use landscape_bootstrap::{
    CliConfig, Script, ScriptSummary, SessionBootstrap, SessionSetup, list_saves,
};
use landscape_core::Snapshot;

use crate::consumer;

/// What the CLI prints once the session has stopped.
#[derive(Debug, Serialize)]
pub struct CliOutput {
    pub session_id: String,
    pub summary: Option<ScriptSummary>,
    /// Revision of the last successful save, 0 if nothing was saved.
    pub revision: u64,
    pub snapshot: Snapshot,
}

pub struct CliApp {
    setup: SessionSetup,
}

pub struct CliAppBuilder {
    bootstrap: SessionBootstrap,
}

impl CliAppBuilder {
    pub fn new(config: CliConfig) -> Self {
        Self {
            bootstrap: SessionBootstrap::new(config),
        }
    }

    pub async fn build(self) -> Result<CliApp> {
        let setup = self.bootstrap.build().await?;
        Ok(CliApp { setup })
    }
}

impl CliApp {
    pub fn builder(config: CliConfig) -> CliAppBuilder {
        CliAppBuilder::new(config)
    }

    pub async fn run(self) -> Result<CliOutput> {
        let SessionSetup {
            config, session, ..
        } = self.setup;

        let handle = session.handle();
        let consumer = consumer::spawn(&handle);

        let summary = match config.script_path {
            Some(ref path) => {
                let script = Script::load(path)?;
                tracing::info!(steps = script.steps.len(), "running script");
                let summary = script.run(&handle).await?;
                tracing::info!(?summary, "script finished");
                Some(summary)
            }
            None => {
                if let Some(ref dir) = config.save_dir {
                    for save in list_saves(dir)? {
                        tracing::info!(
                            session = %save.session_id,
                            revision = save.revision,
                            actions = save.actions,
                            "saved session"
                        );
                    }
                }
                None
            }
        };

        let snapshot = handle.query_state().await?;
        let revision = handle.view().revision;
        let session_id = session.session_id().to_owned();

        drop(handle);
        session.shutdown().await?;
        if let Err(error) = consumer.await {
            tracing::warn!(%error, "event consumer stopped abnormally");
        }

        Ok(CliOutput {
            session_id,
            summary,
            revision,
            snapshot,
        })
    }
}
