//! Worker tasks that back a session.
//!
//! The session worker owns the snapshot and the placement machine; the
//! autosave worker performs persistence calls so the session loop never
//! waits on I/O.

mod autosave;
mod session;

pub(crate) use autosave::{AutosaveCoordinator, AutosaveWorker};
pub(crate) use session::SessionParts;
pub use session::{Command, SessionWorker};
