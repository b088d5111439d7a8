use crate::action::acquire::lookup;
use crate::action::{ActionError, ActionTransition, ensure_invariants};
use crate::env::GameEnv;
use crate::state::{ItemName, ObjectId, Snapshot};

/// Takes a placed object off the grid. The item goes back to storage, so
/// the inventory count is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveAction {
    pub name: ItemName,
    pub id: ObjectId,
}

impl RemoveAction {
    pub fn new(name: impl Into<ItemName>, id: impl Into<ObjectId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

impl ActionTransition for RemoveAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, state: &Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = lookup(env, &self.name)?;
        if !state.placed.contains(item.category, &self.name, &self.id) {
            return Err(ActionError::ObjectNotFound {
                name: self.name.clone(),
                id: self.id.clone(),
            });
        }
        if !item.removable {
            return Err(ActionError::RemovalRestricted {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = lookup(env, &self.name)?;
        state.placed.remove(item.category, &self.name, &self.id)?;
        Ok(())
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}
