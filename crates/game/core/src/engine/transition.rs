//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition, EconomicEvent};
use crate::env::GameEnv;
use crate::state::Snapshot;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the snapshot and return result
/// 3. `post_validate` - Verify world invariants after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut Snapshot,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an action to its transition and collects the economic events it
/// reports. `state` is scratch space: on error it may be partially mutated
/// and must be discarded by the caller.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut Snapshot,
    env: &GameEnv<'_>,
) -> Result<Vec<EconomicEvent>, ExecuteError> {
    let event = match action {
        Action::BuyDecoration(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::BuyDecoration)?
        }
        Action::CraftCollectible(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::CraftCollectible)?
        }
        Action::ConstructBuilding(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::ConstructBuilding)?
        }
        Action::Place(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Place)?;
            None
        }
        Action::Move(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Move)?;
            None
        }
        Action::Remove(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Remove)?;
            None
        }
    };
    Ok(event.into_iter().collect())
}
