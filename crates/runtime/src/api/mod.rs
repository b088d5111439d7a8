//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod analytics;
pub mod clock;
pub mod errors;
pub mod handle;
pub mod persistence;
pub mod report;

pub use analytics::{AnalyticsSink, RecordingAnalytics, TracingAnalytics};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{PersistError, Result, RuntimeError};
pub use handle::SessionHandle;
pub use persistence::PersistenceBackend;
pub use report::{DispatchReport, SessionView};
