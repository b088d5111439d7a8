use crate::action::acquire::{self, Acquisition};
use crate::action::{ActionError, ActionTransition, EconomicEvent, Placement, ensure_invariants};
use crate::env::GameEnv;
use crate::state::{ItemName, Snapshot};

/// Buys one decoration, optionally placing it straight away.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyDecorationAction {
    pub name: ItemName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: Option<Placement>,
}

impl BuyDecorationAction {
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

impl ActionTransition for BuyDecorationAction {
    type Error = ActionError;
    type Result = Option<EconomicEvent>;

    fn pre_validate(&self, state: &Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        acquire::validate(state, env, &self.name, self.placement.as_ref())
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        acquire::apply(
            state,
            env,
            Acquisition::Buy,
            &self.name,
            self.placement.as_ref(),
        )
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}
