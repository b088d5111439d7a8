use crate::action::acquire::{self, lookup};
use crate::action::{ActionError, ActionTransition, Placement, ensure_invariants};
use crate::env::GameEnv;
use crate::ledger::Quantity;
use crate::state::{ItemName, PlacedObject, Snapshot};

/// Puts an item the player already owns onto the grid.
///
/// Nothing is bought: the inventory must hold more of the item than is
/// already placed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceAction {
    pub name: ItemName,
    pub placement: Placement,
}

impl PlaceAction {
    pub fn new(name: impl Into<ItemName>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
        }
    }
}

impl ActionTransition for PlaceAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, state: &Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = lookup(env, &self.name)?;

        let placed = Quantity::from(state.placed.count(item.category, &self.name));
        if state.inventory.count(&self.name) <= placed {
            return Err(ActionError::NothingToPlace {
                name: self.name.clone(),
            });
        }

        acquire::ensure_free(state, env, item, self.placement.coordinates, None)?;
        acquire::ensure_unique(state, item, &self.placement.id)
    }

    fn apply(&self, state: &mut Snapshot, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = lookup(env, &self.name)?;
        state.placed.insert(
            item.category,
            &self.name,
            PlacedObject::new(
                self.placement.id.clone(),
                self.placement.coordinates,
                env.now(),
            ),
        )?;
        Ok(())
    }

    fn post_validate(&self, state: &Snapshot, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_invariants(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Inventory;
    use crate::state::{Coordinates, ObjectRef, PlaceableCategory};
    use crate::testing::{Fixture, qty};

    #[test]
    fn occupied_cell_is_rejected() {
        let fixture = Fixture::new();
        let state = fixture.with_object(
            Snapshot::new(qty(0), Inventory::new().with("Gnome", qty(2))),
            PlaceableCategory::Collectible,
            "Gnome",
            "g1",
            Coordinates::new(2, 2),
        );
        let action = PlaceAction::new("Gnome", Placement::new("g2", Coordinates::new(2, 2)));

        assert_eq!(
            action.pre_validate(&state, &fixture.env()),
            Err(ActionError::CollisionDetected {
                name: "Gnome".into(),
                coordinates: Coordinates::new(2, 2),
                blocked_by: ObjectRef::new("Gnome", "g1"),
            })
        );
    }

    #[test]
    fn every_owned_item_already_placed() {
        let fixture = Fixture::new();
        let state = fixture.with_object(
            Snapshot::new(qty(0), Inventory::new().with("Gnome", qty(1))),
            PlaceableCategory::Collectible,
            "Gnome",
            "g1",
            Coordinates::new(0, 0),
        );
        let action = PlaceAction::new("Gnome", Placement::new("g2", Coordinates::new(5, 5)));

        assert!(matches!(
            action.pre_validate(&state, &fixture.env()),
            Err(ActionError::NothingToPlace { .. })
        ));
    }

    #[test]
    fn duplicate_id_is_rejected_after_collision_check() {
        let fixture = Fixture::new();
        let state = fixture.with_object(
            Snapshot::new(qty(0), Inventory::new().with("Gnome", qty(2))),
            PlaceableCategory::Collectible,
            "Gnome",
            "g1",
            Coordinates::new(0, 0),
        );
        let action = PlaceAction::new("Gnome", Placement::new("g1", Coordinates::new(5, 5)));

        assert!(matches!(
            action.pre_validate(&state, &fixture.env()),
            Err(ActionError::DuplicateId { .. })
        ));
    }

    #[test]
    fn placing_leaves_ledger_alone() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = Snapshot::new(qty(9), Inventory::new().with("Gnome", qty(1)));
        let action = PlaceAction::new("Gnome", Placement::new("g1", Coordinates::new(1, 1)));

        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env).unwrap();

        assert_eq!(state.balance, qty(9));
        assert_eq!(state.inventory.count(&"Gnome".into()), qty(1));
        assert_eq!(
            state
                .placed
                .count(PlaceableCategory::Collectible, &"Gnome".into()),
            1
        );
    }
}
