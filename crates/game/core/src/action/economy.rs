use crate::ledger::Quantity;
use crate::state::ItemName;

/// Side observation reported alongside a successful acquisition.
///
/// Emitting these is the caller's job; the reducer only describes them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum EconomicEvent {
    /// Premium currency was consumed as an ingredient.
    VirtualCurrencySpent {
        currency: ItemName,
        amount: Quantity,
        item: ItemName,
    },
}
