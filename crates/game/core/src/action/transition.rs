use crate::env::GameEnv;
use crate::state::Snapshot;

/// Defines how a concrete action mutates a snapshot.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions that must hold around the mutation. All hooks receive
/// read-only access to the catalog and config via `Env` and must stay side
/// effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the snapshot **before** mutation.
    fn pre_validate(&self, _state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the snapshot directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the snapshot **after** mutation.
    fn post_validate(&self, _state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
