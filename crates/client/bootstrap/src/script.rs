//! Scripted input for headless sessions.
//!
//! A script is a JSON document listing workflow events, direct actions and
//! save requests. Steps run strictly in order through a [`SessionHandle`].
//!
//! ```json
//! {
//!   "credentials": { "token": "t", "farm_id": 7 },
//!   "steps": [
//!     { "event": { "type": "SELECT", "name": "Gnome", "action": "place" } },
//!     { "event": { "type": "UPDATE", "coordinates": { "x": 1, "y": 2 } } },
//!     { "event": { "type": "PLACE" } },
//!     "save"
//!   ]
//! }
//! ```
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use landscape_core::{Action, SaveCredentials, SavingState, WorkflowEvent};
use landscape_runtime::{RuntimeError, SessionHandle};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Deliver a UI event to the placement machine.
    Event(WorkflowEvent),
    /// Run one action through the reducer, bypassing the machine.
    Action(Action),
    /// Request a save with the script's credentials.
    Save,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub credentials: Option<SaveCredentials>,
    pub steps: Vec<ScriptStep>,
}

/// Tally of what a script run did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    pub handled: usize,
    pub ignored: usize,
    pub blocked: usize,
    pub applied: usize,
    pub rejected: usize,
    pub saves_started: usize,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing script {}", path.display()))
    }

    /// Run every step, then wait for an in-flight save to settle.
    pub async fn run(&self, handle: &SessionHandle) -> Result<ScriptSummary> {
        let mut summary = ScriptSummary::default();

        for (index, step) in self.steps.iter().enumerate() {
            let report = match step {
                ScriptStep::Event(event) => handle.dispatch(event.clone()).await?,
                ScriptStep::Save => {
                    let Some(credentials) = self.credentials.clone() else {
                        bail!("step {index} saves but the script has no credentials");
                    };
                    handle.save(credentials).await?
                }
                ScriptStep::Action(action) => {
                    match handle.execute(action.clone()).await {
                        Ok(_) => summary.applied += 1,
                        Err(RuntimeError::ActionRejected(error)) => {
                            tracing::warn!(step = index, %error, "scripted action rejected");
                            summary.rejected += 1;
                        }
                        Err(error) => return Err(error.into()),
                    }
                    continue;
                }
            };

            if report.handled {
                summary.handled += 1;
            } else if report.blocked {
                summary.blocked += 1;
            } else {
                tracing::debug!(step = index, "scripted event ignored");
                summary.ignored += 1;
            }
            summary.applied += report.applied.len();
            summary.rejected += report.rejected.len();
            summary.saves_started += usize::from(report.save_started);
        }

        let mut view = handle.observe();
        view.wait_for(|view| view.machine.saving != SavingState::Autosaving)
            .await
            .context("session stopped while a save was in flight")?;

        Ok(summary)
    }
}
