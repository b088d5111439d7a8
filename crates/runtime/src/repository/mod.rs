//! Repository layer for player sessions.
//!
//! Repositories hold data that changes during play: the latest snapshot and
//! the stream of actions applied to reach it. Static content (the catalog) is
//! served by the oracle layer, not by repositories.

mod backend;
mod error;
mod file;
mod memory;
mod traits;

pub use backend::RepositoryBackend;
pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepo;
pub use memory::InMemorySnapshotRepo;
pub use traits::{SavedSession, SnapshotRepository};
