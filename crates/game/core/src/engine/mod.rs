//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`Snapshot`]. It never
//! mutates its input: every action is applied to a clone, and the clone is
//! only handed back when all three phases (pre_validate, apply,
//! post_validate) succeed. A rejected action therefore leaves the caller's
//! snapshot exactly as it was.
mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, AppliedAction, EconomicEvent};
use crate::env::GameEnv;
use crate::state::Snapshot;

/// Result of a successful action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// The next authoritative snapshot.
    pub snapshot: Snapshot,

    /// Economic observations for the analytics boundary.
    pub events: Vec<EconomicEvent>,
}

/// Applies `action` to a copy of `snapshot`.
///
/// Pure: the same snapshot, environment, and action always produce the same
/// outcome.
pub fn apply(
    snapshot: &Snapshot,
    env: &GameEnv<'_>,
    action: &Action,
) -> Result<ExecutionOutcome, ExecuteError> {
    let mut working = snapshot.clone();
    let events = transition::execute_transition(action, &mut working, env)?;
    Ok(ExecutionOutcome {
        snapshot: working,
        events,
    })
}

/// Outcome of replaying a recorded action stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayReport {
    pub snapshot: Snapshot,
    pub applied: usize,
    /// Index into the stream and the reason, for every skipped action.
    pub rejected: Vec<(usize, ExecuteError)>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Replays `actions` from `initial`, each at its recorded instant.
///
/// Rejected actions are skipped and reported; later actions still run.
pub fn replay<'s>(
    initial: Snapshot,
    env: &GameEnv<'_>,
    actions: impl IntoIterator<Item = &'s AppliedAction>,
) -> ReplayReport {
    let mut report = ReplayReport {
        snapshot: initial,
        applied: 0,
        rejected: Vec::new(),
    };
    for (index, recorded) in actions.into_iter().enumerate() {
        let env = env.at(recorded.applied_at);
        match apply(&report.snapshot, &env, &recorded.action) {
            Ok(outcome) => {
                report.snapshot = outcome.snapshot;
                report.applied += 1;
            }
            Err(error) => report.rejected.push((index, error)),
        }
    }
    report
}

/// Reducer bound to one environment.
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Applies an action with the engine's environment.
    pub fn apply(
        &self,
        snapshot: &Snapshot,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        apply(snapshot, &self.env, action)
    }

    pub fn replay<'s>(
        &self,
        initial: Snapshot,
        actions: impl IntoIterator<Item = &'s AppliedAction>,
    ) -> ReplayReport {
        replay(initial, &self.env, actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{
        ActionError, BuyDecorationAction, MoveAction, PlaceAction, Placement, RemoveAction,
    };
    use crate::config::{GameConfig, SpatialIndexKind};
    use crate::error::{ErrorSeverity, GameError};
    use crate::ledger::{Inventory, Quantity};
    use crate::state::{Coordinates, PlaceableCategory, Timestamp};
    use crate::testing::{Fixture, qty};
    use proptest::prelude::*;

    #[test]
    fn purchase_produces_new_snapshot() {
        let fixture = Fixture::new();
        let before = Snapshot::new(qty(100), Inventory::new());

        let outcome = apply(
            &before,
            &fixture.env(),
            &BuyDecorationAction::new("Gnome").into(),
        )
        .unwrap();

        assert_eq!(outcome.snapshot.balance, qty(60));
        assert_eq!(
            outcome.snapshot.inventory.count(&"Gnome".into()),
            Quantity::ONE
        );
        assert!(outcome.events.is_empty());
        assert_eq!(before.balance, qty(100));
    }

    #[test]
    fn rejection_reports_phase_and_reason() {
        let fixture = Fixture::new();
        let before = Snapshot::new(qty(10), Inventory::new());

        let error = apply(
            &before,
            &fixture.env(),
            &BuyDecorationAction::new("Gnome").into(),
        )
        .unwrap_err();

        assert_eq!(error.phase(), TransitionPhase::PreValidate);
        assert_eq!(
            error.reason(),
            &ActionError::InsufficientFunds {
                have: qty(10),
                need: qty(40)
            }
        );
    }

    #[test]
    fn placement_onto_occupied_cell_fails_on_both_indexes() {
        for kind in [
            SpatialIndexKind::LinearScan,
            SpatialIndexKind::Grid { cell_size: 4 },
        ] {
            let fixture = Fixture::new().with_config(GameConfig::new().with_spatial_index(kind));
            let state = fixture.with_object(
                Snapshot::new(qty(0), Inventory::new().with("Gnome", qty(2))),
                PlaceableCategory::Collectible,
                "Gnome",
                "g1",
                Coordinates::new(2, 2),
            );
            let action = PlaceAction::new("Gnome", Placement::new("g2", Coordinates::new(2, 2)));

            let error = apply(&state, &fixture.env(), &action.into()).unwrap_err();
            assert!(
                matches!(error.reason(), ActionError::CollisionDetected { .. }),
                "{kind:?}: {error}"
            );
        }
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let config = GameConfig::new();
        let env: GameEnv<'_> = GameEnv::new(None, Some(&config), Timestamp::ZERO);

        let error = apply(
            &Snapshot::default(),
            &env,
            &BuyDecorationAction::new("Gnome").into(),
        )
        .unwrap_err();

        assert_eq!(error.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn replay_skips_rejections_and_continues() {
        let fixture = Fixture::new();
        let stream = vec![
            AppliedAction::new(
                BuyDecorationAction::placed("Gnome", Placement::new("g1", Coordinates::new(0, 0)))
                    .into(),
                Timestamp::from_millis(1),
            ),
            AppliedAction::new(
                RemoveAction::new("Gnome", "missing").into(),
                Timestamp::from_millis(2),
            ),
            AppliedAction::new(
                MoveAction::new("Gnome", "g1", Coordinates::new(5, 5)).into(),
                Timestamp::from_millis(3),
            ),
        ];

        let report = GameEngine::new(fixture.env())
            .replay(Snapshot::new(qty(100), Inventory::new()), &stream);

        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, 1);
        let gnome = report
            .snapshot
            .placed
            .find(PlaceableCategory::Collectible, &"Gnome".into(), &"g1".into())
            .unwrap();
        assert_eq!(gnome.coordinates, Coordinates::new(5, 5));
        assert_eq!(gnome.created_at, Timestamp::from_millis(1));
    }

    fn arbitrary_action() -> impl Strategy<Value = Action> {
        let names = prop::sample::select(vec!["Gnome", "Statue", "Flag", "Barn", "Tree", "Scroll"]);
        let coords = (0i32..8, 0i32..8).prop_map(|(x, y)| Coordinates::new(x, y));
        let ids = prop::sample::select(vec!["a", "b", "c"]);
        prop_oneof![
            names
                .clone()
                .prop_map(|name| Action::from(BuyDecorationAction::new(name))),
            (names.clone(), ids.clone(), coords.clone()).prop_map(|(name, id, at)| {
                Action::from(BuyDecorationAction::placed(name, Placement::new(id, at)))
            }),
            (names.clone(), ids.clone(), coords.clone()).prop_map(|(name, id, at)| {
                Action::from(PlaceAction::new(name, Placement::new(id, at)))
            }),
            (names.clone(), ids.clone(), coords)
                .prop_map(|(name, id, at)| Action::from(MoveAction::new(name, id, at))),
            (names, ids).prop_map(|(name, id)| Action::from(RemoveAction::new(name, id))),
        ]
    }

    fn arbitrary_snapshot() -> impl Strategy<Value = Snapshot> {
        (0i64..500, 0i64..4, 0i64..8, 0i64..8).prop_map(|(balance, buck, wood, stone)| {
            Snapshot::new(
                qty(balance),
                Inventory::new()
                    .with("Block Buck", qty(buck))
                    .with("Wood", qty(wood))
                    .with("Stone", qty(stone)),
            )
        })
    }

    proptest! {
        #[test]
        fn apply_is_deterministic(
            snapshot in arbitrary_snapshot(),
            actions in prop::collection::vec(arbitrary_action(), 0..12),
        ) {
            let fixture = Fixture::new();
            let env = fixture.env();
            let stream: Vec<_> = actions
                .into_iter()
                .map(|action| AppliedAction::new(action, Timestamp::from_millis(7)))
                .collect();

            let first = replay(snapshot.clone(), &env, &stream);
            let second = replay(snapshot, &env, &stream);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn successful_actions_keep_ledger_non_negative(
            snapshot in arbitrary_snapshot(),
            actions in prop::collection::vec(arbitrary_action(), 0..12),
        ) {
            let fixture = Fixture::new();
            let env = fixture.env();
            let mut current = snapshot;
            for action in &actions {
                if let Ok(outcome) = apply(&current, &env, action) {
                    prop_assert!(outcome.snapshot.balance >= Quantity::ZERO);
                    prop_assert!(outcome.snapshot.inventory.first_negative().is_none());
                    prop_assert!(outcome.snapshot.placed.first_duplicate().is_none());
                    current = outcome.snapshot;
                }
            }
        }

        #[test]
        fn rejection_leaves_snapshot_untouched(
            snapshot in arbitrary_snapshot(),
            action in arbitrary_action(),
        ) {
            let fixture = Fixture::new();
            let before = snapshot.clone();
            let _ = apply(&snapshot, &fixture.env(), &action);
            prop_assert_eq!(snapshot, before);
        }
    }
}
