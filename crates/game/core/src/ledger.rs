//! Exact-precision ledger primitives.
//!
//! Balances and item counts are [`Decimal`] values. Nothing in this module
//! clamps: a debit that would go negative is an error, and reducers are
//! expected to have rejected the action before such a debit is attempted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemName;

/// Exact ledger quantity (balances, item counts, ingredient amounts).
pub type Quantity = Decimal;

/// Raised when a ledger step would go negative or out of range.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerError {
    #[error("cannot debit {need} from balance {have}")]
    InsufficientBalance { have: Quantity, need: Quantity },

    #[error("cannot debit {need} {item} from stock {have}")]
    InsufficientStock {
        item: ItemName,
        have: Quantity,
        need: Quantity,
    },

    #[error("ledger amounts must not be negative (got {amount})")]
    NegativeAmount { amount: Quantity },

    #[error("adding {amount} to {have} overflows")]
    Overflow { have: Quantity, amount: Quantity },
}

impl GameError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "LEDGER_INSUFFICIENT_BALANCE",
            Self::InsufficientStock { .. } => "LEDGER_INSUFFICIENT_STOCK",
            Self::NegativeAmount { .. } => "LEDGER_NEGATIVE_AMOUNT",
            Self::Overflow { .. } => "LEDGER_OVERFLOW",
        }
    }
}

/// Subtracts `amount` from `balance`, refusing to go below zero.
pub fn debit(balance: Quantity, amount: Quantity) -> Result<Quantity, LedgerError> {
    ensure_non_negative(amount)?;
    if balance < amount {
        return Err(LedgerError::InsufficientBalance {
            have: balance,
            need: amount,
        });
    }
    Ok(balance - amount)
}

/// Adds `amount` to `balance`.
pub fn credit(balance: Quantity, amount: Quantity) -> Result<Quantity, LedgerError> {
    ensure_non_negative(amount)?;
    checked_add(balance, amount)
}

pub(crate) fn checked_add(have: Quantity, amount: Quantity) -> Result<Quantity, LedgerError> {
    have.checked_add(amount).ok_or(LedgerError::Overflow { have, amount })
}

fn ensure_non_negative(amount: Quantity) -> Result<(), LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::NegativeAmount { amount });
    }
    Ok(())
}

/// Item-kind → quantity mapping. Missing entries read as zero.
///
/// Backed by a `BTreeMap` so iteration and serialization order are stable,
/// which keeps snapshots byte-for-byte reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<ItemName, Quantity>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper used by fixtures and loaders.
    pub fn with(mut self, item: impl Into<ItemName>, amount: Quantity) -> Self {
        self.items.insert(item.into(), amount);
        self
    }

    /// Quantity held for `item`, defaulting to zero.
    pub fn count(&self, item: &ItemName) -> Quantity {
        self.items.get(item).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn has_at_least(&self, item: &ItemName, need: Quantity) -> bool {
        self.count(item) >= need
    }

    /// Removes `amount` of `item`. The entry is kept (at zero) when emptied.
    pub fn debit(&mut self, item: &ItemName, amount: Quantity) -> Result<(), LedgerError> {
        ensure_non_negative(amount)?;
        let have = self.count(item);
        if have < amount {
            return Err(LedgerError::InsufficientStock {
                item: item.clone(),
                have,
                need: amount,
            });
        }
        self.items.insert(item.clone(), have - amount);
        Ok(())
    }

    pub fn credit(&mut self, item: &ItemName, amount: Quantity) -> Result<(), LedgerError> {
        let next = credit(self.count(item), amount)?;
        self.items.insert(item.clone(), next);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, &Quantity)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First entry holding a negative quantity, if any.
    pub fn first_negative(&self) -> Option<(&ItemName, &Quantity)> {
        self.items
            .iter()
            .find(|(_, amount)| amount.is_sign_negative() && !amount.is_zero())
    }
}

impl FromIterator<(ItemName, Quantity)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (ItemName, Quantity)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn name(value: &str) -> ItemName {
        ItemName::from(value)
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let inventory = Inventory::new();
        assert_eq!(inventory.count(&name("Wood")), Decimal::ZERO);
        assert!(inventory.has_at_least(&name("Wood"), Decimal::ZERO));
        assert!(!inventory.has_at_least(&name("Wood"), Decimal::ONE));
    }

    #[test]
    fn debit_refuses_to_go_negative() {
        let mut inventory = Inventory::new().with("Wood", Decimal::new(3, 0));
        let err = inventory
            .debit(&name("Wood"), Decimal::new(5, 0))
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientStock { .. }));
        assert_eq!(inventory.count(&name("Wood")), Decimal::new(3, 0));
    }

    #[test]
    fn debit_keeps_fractional_precision() {
        let mut inventory = Inventory::new().with("Wood", Decimal::new(3, 1));
        inventory.debit(&name("Wood"), Decimal::new(1, 1)).unwrap();
        assert_eq!(inventory.count(&name("Wood")), Decimal::new(2, 1));
    }

    #[test]
    fn balance_debit_and_credit() {
        let balance = Decimal::new(100, 0);
        assert_eq!(debit(balance, Decimal::new(40, 0)), Ok(Decimal::new(60, 0)));
        assert!(debit(Decimal::new(10, 0), Decimal::new(40, 0)).is_err());
        assert!(credit(balance, Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn credit_past_the_decimal_range_is_an_error() {
        let mut inventory = Inventory::new().with("Wood", Decimal::MAX);

        assert_eq!(
            credit(Decimal::MAX, Decimal::ONE),
            Err(LedgerError::Overflow {
                have: Decimal::MAX,
                amount: Decimal::ONE,
            })
        );
        assert!(matches!(
            inventory.credit(&name("Wood"), Decimal::ONE),
            Err(LedgerError::Overflow { .. })
        ));
        assert_eq!(inventory.count(&name("Wood")), Decimal::MAX);
    }
}
