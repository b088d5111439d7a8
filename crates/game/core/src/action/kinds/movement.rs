use crate::action::acquire::{self, lookup};
use crate::action::{ActionError, ActionTransition, ensure_invariants};
use crate::env::GameEnv;
use crate::state::{Coordinates, ItemName, ObjectId, ObjectRef, Snapshot};

/// Relocates a placed object. Only its coordinates change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub name: ItemName,
    pub id: ObjectId,
    pub coordinates: Coordinates,
}

impl MoveAction {
    pub fn new(
        name: impl Into<ItemName>,
        id: impl Into<ObjectId>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            coordinates,
        }
    }

    fn object(&self) -> ObjectRef {
        ObjectRef::new(self.name.clone(), self.id.clone())
    }
}

impl ActionTransition for MoveAction {
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
        acquire::ensure_free(state, env, item, self.coordinates, Some(&self.object()))
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = lookup(env, &self.name)?;
        state
            .placed
            .relocate(item.category, &self.name, &self.id, self.coordinates)?;
        Ok(())
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}
