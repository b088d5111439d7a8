use crate::action::acquire::{self, Acquisition};
use crate::action::{ActionError, ActionTransition, EconomicEvent, Placement, ensure_invariants};
use crate::env::GameEnv;
use crate::state::{ItemName, Snapshot};

/// Crafts one collectible from its ingredients.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftCollectibleAction {
    pub name: ItemName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: Option<Placement>,
}

impl CraftCollectibleAction {
    pub fn new(name: impl Into<ItemName>) -> Self {
        Self {
            name: name.into(),
            placement: None,
        }
    }

    pub fn placed(name: impl Into<ItemName>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement: Some(placement),
        }
    }
}

impl ActionTransition for CraftCollectibleAction {
    type Error = ActionError;
    type Result = Option<EconomicEvent>;

    fn pre_validate(&self, state: &Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        acquire::validate(state, env, &self.name, self.placement.as_ref())
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        acquire::apply(
            state,
            env,
            Acquisition::Craft,
            &self.name,
            self.placement.as_ref(),
        )
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Inventory, Quantity};
    use crate::testing::{Fixture, qty};

    #[test]
    fn consumes_ingredients() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = Snapshot::new(
            qty(100),
            Inventory::new().with("Stone", qty(7)).with("Wood", qty(3)),
        );
        let action = CraftCollectibleAction::new("Statue");

        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env).unwrap();

        assert_eq!(state.inventory.count(&"Stone".into()), qty(2));
        assert_eq!(state.inventory.count(&"Wood".into()), qty(1));
        assert_eq!(state.inventory.count(&"Statue".into()), Quantity::ONE);
        assert_eq!(
            state
                .bumpkin
                .as_ref()
                .unwrap()
                .activity
                .get("Statue Crafted"),
            Quantity::ONE
        );
    }
}
