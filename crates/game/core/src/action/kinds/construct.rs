use crate::action::acquire::{self, Acquisition};
use crate::action::{ActionError, ActionTransition, EconomicEvent, Placement, ensure_invariants};
use crate::env::GameEnv;
use crate::state::{ItemName, Snapshot};

/// Constructs a building. Buildings always land on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructBuildingAction {
    pub name: ItemName,
    pub placement: Placement,
}

impl ConstructBuildingAction {
    pub fn new(name: impl Into<ItemName>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
        }
    }
}

impl ActionTransition for ConstructBuildingAction {
    type Error = ActionError;
    type Result = Option<EconomicEvent>;

    fn pre_validate(&self, state: &Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        acquire::validate(state, env, &self.name, Some(&self.placement))
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        acquire::apply(
            state,
            env,
            Acquisition::Construct,
            &self.name,
            Some(&self.placement),
        )
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}
