//! Authoritative world snapshot.
//!
//! A [`Snapshot`] is the entire world for one player at one instant. It is a
//! value type: the engine clones it, applies an action to the clone, and hands
//! the clone back. Runtime layers never mutate a snapshot directly.
mod bumpkin;
mod common;
mod error;
mod placed;

pub use bumpkin::{Activity, Bumpkin};
pub use common::{Coordinates, ItemName, ObjectId, ObjectRef, Timestamp};
pub use error::{InvariantViolation, StateError};
pub use placed::{PlaceableCategory, PlacedObject, PlacedObjects};

use crate::ledger::{Inventory, Quantity};

/// Canonical snapshot of one player's world.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Spendable ledger balance. Never negative.
    pub balance: Quantity,

    /// Item counts. Never negative.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,

    /// Objects located on the grid.
    #[cfg_attr(feature = "serde", serde(default))]
    pub placed: PlacedObjects,

    /// Player avatar. Acquisitions fail without one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bumpkin: Option<Bumpkin>,
}

impl Snapshot {
    pub fn new(balance: Quantity, inventory: Inventory) -> Self {
        Self {
            balance,
            inventory,
            placed: PlacedObjects::new(),
            bumpkin: Some(Bumpkin::new()),
        }
    }

    pub fn with_placed(mut self, placed: PlacedObjects) -> Self {
        self.placed = placed;
        self
    }

    pub fn without_bumpkin(mut self) -> Self {
        self.bumpkin = None;
        self
    }

    /// Checks the world invariants: non-negative ledger, unique ids per kind.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.balance.is_sign_negative() && !self.balance.is_zero() {
            return Err(InvariantViolation::NegativeBalance(self.balance));
        }
        if let Some((item, amount)) = self.inventory.first_negative() {
            return Err(InvariantViolation::NegativeInventory {
                item: item.clone(),
                amount: *amount,
            });
        }
        if let Some((name, id)) = self.placed.first_duplicate() {
            return Err(InvariantViolation::DuplicateObjectId {
                name: name.clone(),
                id: id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn fresh_snapshot_satisfies_invariants() {
        let snapshot = Snapshot::new(Decimal::new(100, 0), Inventory::new());
        assert_eq!(snapshot.check_invariants(), Ok(()));
    }

    #[test]
    fn negative_inventory_is_reported() {
        let snapshot = Snapshot::new(
            Decimal::ZERO,
            Inventory::new().with("Wood", Decimal::new(-1, 0)),
        );
        assert!(matches!(
            snapshot.check_invariants(),
            Err(InvariantViolation::NegativeInventory { .. })
        ));
    }
}
