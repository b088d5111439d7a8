//! Validation and mutation shared by every acquisition.
//!
//! Buying, crafting, and constructing differ only in their activity label and
//! in whether a placement is mandatory. The checks run in a fixed order and
//! the first failure wins:
//!
//! 1. the item exists in the catalog
//! 2. a bumpkin is present
//! 3. the balance covers the cost
//! 4. the per-item limit is not reached
//! 5. every ingredient is held, in catalog order
//! 6. the placement is free, then its id is unused
use crate::env::{GameEnv, ItemDefinition};
use crate::ledger::{self, Quantity};
use crate::spatial::{self, Footprint};
use crate::state::{Coordinates, ItemName, ObjectId, ObjectRef, PlacedObject, Snapshot};

use super::{ActionError, EconomicEvent, Placement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Acquisition {
    Buy,
    Craft,
    Construct,
}

impl Acquisition {
    fn verb(self) -> &'static str {
        match self {
            Self::Buy => "Bought",
            Self::Craft => "Crafted",
            Self::Construct => "Built",
        }
    }

    /// Activity label counting acquisitions of `name`.
    pub(crate) fn activity(self, name: &ItemName) -> String {
        format!("{name} {}", self.verb())
    }
}

pub(crate) fn lookup<'a>(
    env: &GameEnv<'a>,
    name: &ItemName,
) -> Result<&'a ItemDefinition, ActionError> {
    env.catalog()?
        .definition(name)
        .ok_or_else(|| ActionError::UnknownItem { name: name.clone() })
}

pub(crate) fn validate(
    state: &Snapshot,
    env: &GameEnv<'_>,
    name: &ItemName,
    placement: Option<&Placement>,
) -> Result<(), ActionError> {
    let item = lookup(env, name)?;

    if state.bumpkin.is_none() {
        return Err(ActionError::MissingActor);
    }

    if state.balance < item.cost {
        return Err(ActionError::InsufficientFunds {
            have: state.balance,
            need: item.cost,
        });
    }

    if let Some(limit) = item.limit
        && state.inventory.count(name) >= limit
    {
        return Err(ActionError::LimitReached {
            name: name.clone(),
            limit,
        });
    }

    for ingredient in &item.ingredients {
        let have = state.inventory.count(&ingredient.item);
        if have < ingredient.amount {
            return Err(ActionError::InsufficientIngredient {
                ingredient: ingredient.item.clone(),
                have,
                need: ingredient.amount,
            });
        }
    }

    if let Some(placement) = placement {
        ensure_free(state, env, item, placement.coordinates, None)?;
        ensure_unique(state, item, &placement.id)?;
    }

    Ok(())
}

/// Applies an acquisition that already passed [`validate`].
pub(crate) fn apply(
    state: &mut Snapshot,
    env: &GameEnv<'_>,
    kind: Acquisition,
    name: &ItemName,
    placement: Option<&Placement>,
) -> Result<Option<EconomicEvent>, ActionError> {
    let item = lookup(env, name)?;
    let config = env.config()?;

    state.balance = ledger::debit(state.balance, item.cost)?;
    for ingredient in &item.ingredients {
        state.inventory.debit(&ingredient.item, ingredient.amount)?;
    }
    state.inventory.credit(name, Quantity::ONE)?;

    if let Some(placement) = placement {
        state.placed.insert(
            item.category,
            name,
            PlacedObject::new(placement.id.clone(), placement.coordinates, env.now()),
        )?;
    }

    let bumpkin = state.bumpkin.as_mut().ok_or(ActionError::MissingActor)?;
    bumpkin.activity.track(config.spend_activity.clone(), item.cost)?;
    bumpkin.activity.track(kind.activity(name), Quantity::ONE)?;

    Ok(item
        .ingredient(&config.premium_currency)
        .filter(|amount| !amount.is_zero())
        .map(|amount| EconomicEvent::VirtualCurrencySpent {
            currency: config.premium_currency.clone(),
            amount,
            item: name.clone(),
        }))
}

/// Fails when `item` placed at `coordinates` would overlap another object.
///
/// `moving` is the object being relocated, which never collides with itself.
pub(crate) fn ensure_free(
    state: &Snapshot,
    env: &GameEnv<'_>,
    item: &ItemDefinition,
    coordinates: Coordinates,
    moving: Option<&ObjectRef>,
) -> Result<(), ActionError> {
    let dimensions = item.dimensions.ok_or_else(|| ActionError::NotPlaceable {
        name: item.name.clone(),
    })?;
    let catalog = env.catalog()?;
    let config = env.config()?;

    let detector = spatial::detector(config.spatial_index, state, catalog);
    match detector.first_collision(&Footprint::at(coordinates, dimensions), moving) {
        Some(occupant) => Err(ActionError::CollisionDetected {
            name: item.name.clone(),
            coordinates,
            blocked_by: ObjectRef::new(occupant.name.clone(), occupant.id.clone()),
        }),
        None => Ok(()),
    }
}

pub(crate) fn ensure_unique(
    state: &Snapshot,
    item: &ItemDefinition,
    id: &ObjectId,
) -> Result<(), ActionError> {
    if state.placed.contains(item.category, &item.name, id) {
        return Err(ActionError::DuplicateId {
            name: item.name.clone(),
            id: id.clone(),
        });
    }
    Ok(())
}
