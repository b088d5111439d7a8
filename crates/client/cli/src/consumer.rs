//! Forwards bus events to the log while a script runs.
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use landscape_runtime::{AutosaveEvent, Event, SessionEvent, SessionHandle, Topic};

pub fn spawn(handle: &SessionHandle) -> JoinHandle<()> {
    let session = handle.subscribe(Topic::Session);
    let autosave = handle.subscribe(Topic::Autosave);
    tokio::spawn(consume(session, autosave))
}

async fn consume(
    mut session: broadcast::Receiver<Event>,
    mut autosave: broadcast::Receiver<Event>,
) {
    let mut session_open = true;
    let mut autosave_open = true;

    while session_open || autosave_open {
        let received = tokio::select! {
            received = session.recv(), if session_open => received,
            received = autosave.recv(), if autosave_open => received,
        };

        match received {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event consumer lagged");
            }
            Err(RecvError::Closed) => {
                // Both channels close together when the session stops.
                session_open = false;
                autosave_open = false;
            }
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Session(SessionEvent::ActionApplied { action, events }) => {
            tracing::info!(action = ?action.action, economic = events.len(), "applied");
        }
        Event::Session(SessionEvent::ActionRejected { action, phase, error }) => {
            tracing::warn!(?action, ?phase, %error, "rejected");
        }
        Event::Session(SessionEvent::PlacementBlocked { name, coordinates }) => {
            tracing::info!(%name, ?coordinates, "placement blocked by collision");
        }
        Event::Autosave(AutosaveEvent::Started { actions }) => {
            tracing::info!(actions, "autosave started");
        }
        Event::Autosave(AutosaveEvent::Saved(receipt)) => {
            tracing::info!(revision = receipt.revision, actions = receipt.actions, "saved");
        }
        Event::Autosave(AutosaveEvent::Failed { reason }) => {
            tracing::error!(%reason, "autosave failed");
        }
        Event::Workflow(notice) => tracing::trace!(?notice, "workflow"),
    }
}
