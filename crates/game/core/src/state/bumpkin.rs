//! Player avatar record.

use std::collections::BTreeMap;

use crate::ledger::{self, LedgerError, Quantity};

/// Cumulative activity counters, keyed by label (e.g. `"Gnome Bought"`).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Activity(BTreeMap<String, Quantity>);

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, zero when never tracked.
    pub fn get(&self, label: &str) -> Quantity {
        self.0.get(label).copied().unwrap_or(Quantity::ZERO)
    }

    /// Adds `amount` to the counter. Tracking zero still creates the entry.
    pub fn track(
        &mut self,
        label: impl Into<String>,
        amount: Quantity,
    ) -> Result<(), LedgerError> {
        let counter = self.0.entry(label.into()).or_insert(Quantity::ZERO);
        *counter = ledger::checked_add(*counter, amount)?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Quantity)> {
        self.0.iter()
    }
}

/// The player's avatar. Acquisitions require one to exist.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bumpkin {
    #[cfg_attr(feature = "serde", serde(default))]
    pub activity: Activity,
}

impl Bumpkin {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflowing_counter_is_left_untouched() {
        let mut activity = Activity::new();
        activity.track("Coins Spent", Quantity::MAX).unwrap();

        assert!(matches!(
            activity.track("Coins Spent", Quantity::ONE),
            Err(LedgerError::Overflow { .. })
        ));
        assert_eq!(activity.get("Coins Spent"), Quantity::MAX);
    }
}
