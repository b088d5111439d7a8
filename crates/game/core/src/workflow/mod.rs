//! Placement workflow state machine.
//!
//! Two regions progress side by side: `saving` tracks the single in-flight
//! save and `editing` tracks selection, dragging, and committing. `CANCEL`
//! sends both to `Done` at once, after which every event is ignored.
//!
//! The machine is a value. [`LandscapingMachine::transition`] returns the
//! next machine and the [`Effect`]s to perform without touching `self`.
//! Events with no transition in the current state are ignored rather than
//! rejected, to tolerate UI races.
//!
//! The machine holds no spatial logic. It trusts the collision flag its
//! caller feeds in, so the caller must not send `PLACE` while that flag is
//! set.
mod context;
mod effects;
mod events;
mod ids;

pub use context::{Requirements, Selection, WorkflowContext};
pub use effects::{Effect, SaveCredentials, SaveReceipt, SaveRequest};
pub use events::WorkflowEvent;
pub use ids::{IdGenerator, SequentialIds};

use crate::action::Placement;
use crate::state::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SavingState {
    #[default]
    Idle,
    Autosaving,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EditingState {
    #[default]
    Idle,
    Placing,
    Dragging,
    Resetting,
    Done,
}

/// What a single event did.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Reaction {
    pub effects: Vec<Effect>,
    /// `false` when no region had a transition for the event.
    pub handled: bool,
}

impl Reaction {
    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandscapingMachine {
    pub saving: SavingState,
    pub editing: EditingState,
    pub context: WorkflowContext,
}

impl LandscapingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with `context`, entering `placing` straight away when
    /// it already carries a selection.
    pub fn with_context(context: WorkflowContext) -> Self {
        let mut machine = Self {
            context,
            ..Self::default()
        };
        machine.settle();
        machine
    }

    /// Both regions reached their terminal state.
    pub fn is_done(&self) -> bool {
        self.saving == SavingState::Done && self.editing == EditingState::Done
    }

    /// Computes the machine after `event` without modifying `self`.
    pub fn transition(
        &self,
        event: WorkflowEvent,
        ids: &mut dyn IdGenerator,
    ) -> (Self, Reaction) {
        let mut next = self.clone();
        let reaction = next.send(event, ids);
        (next, reaction)
    }

    /// Applies `event` in place.
    pub fn send(&mut self, event: WorkflowEvent, ids: &mut dyn IdGenerator) -> Reaction {
        if self.is_done() {
            return Reaction::ignored();
        }

        if let WorkflowEvent::Cancel = event {
            self.saving = SavingState::Done;
            self.editing = EditingState::Done;
            return Reaction {
                effects: Vec::new(),
                handled: true,
            };
        }

        let mut effects = Vec::new();
        let saved = self.on_saving(&event, &mut effects);
        let edited = self.on_editing(event, ids, &mut effects);
        self.settle();

        Reaction {
            effects,
            handled: saved || edited,
        }
    }

    fn on_saving(&mut self, event: &WorkflowEvent, effects: &mut Vec<Effect>) -> bool {
        match (self.saving, event) {
            (SavingState::Idle, WorkflowEvent::Save(request)) => {
                self.saving = SavingState::Autosaving;
                effects.push(Effect::Persist(request.clone()));
                true
            }
            (SavingState::Autosaving, WorkflowEvent::SaveSucceeded(receipt)) => {
                self.saving = SavingState::Idle;
                effects.push(Effect::SaveCompleted(receipt.clone()));
                true
            }
            (SavingState::Autosaving, WorkflowEvent::SaveFailed { reason }) => {
                self.saving = SavingState::Idle;
                effects.push(Effect::SaveFailed(reason.clone()));
                true
            }
            _ => false,
        }
    }

    fn on_editing(
        &mut self,
        event: WorkflowEvent,
        ids: &mut dyn IdGenerator,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let context = &mut self.context;
        match (self.editing, event) {
            (EditingState::Idle, WorkflowEvent::Select(selection)) => {
                context.selection = Some(selection);
                self.editing = EditingState::Placing;
            }
            (EditingState::Idle, WorkflowEvent::Move { name, id }) => {
                context.moving = Some(crate::state::ObjectRef::new(name, id));
            }
            (EditingState::Idle, WorkflowEvent::Blur) => context.moving = None,
            (EditingState::Idle, WorkflowEvent::Build) => {}
            (EditingState::Idle, WorkflowEvent::Remove { name, id }) => {
                effects.push(Effect::Dispatch(
                    crate::action::RemoveAction::new(name, id).into(),
                ));
                context.moving = None;
            }

            (
                EditingState::Placing | EditingState::Dragging,
                WorkflowEvent::Update {
                    coordinates,
                    collision_detected,
                },
            ) => {
                context.coordinates = coordinates;
                context.collision_detected = collision_detected;
            }
            (EditingState::Placing, WorkflowEvent::Back) => {
                context.selection = None;
                self.editing = EditingState::Idle;
            }
            (EditingState::Placing, WorkflowEvent::Drag) => self.editing = EditingState::Dragging,
            (
                EditingState::Placing,
                WorkflowEvent::Place {
                    next_origin,
                    next_will_collide,
                },
            ) => return self.on_place(next_origin, next_will_collide, ids, effects),

            (EditingState::Dragging, WorkflowEvent::Drop) => self.editing = EditingState::Placing,

            _ => return false,
        }
        true
    }

    /// The three `PLACE` branches, tried in order.
    fn on_place(
        &mut self,
        next_origin: Option<Coordinates>,
        next_will_collide: bool,
        ids: &mut dyn IdGenerator,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let Some(selection) = self.context.selection.as_mut() else {
            return false;
        };
        let committed = self.context.coordinates;
        let action = selection
            .action
            .into_action(selection.name.clone(), Placement::new(ids.next_id(), committed));
        effects.push(Effect::Dispatch(action));

        let has_quota = selection.maximum.is_none_or(|left| left > 0);
        if selection.multiple
            && has_quota
            && let Some(next) = next_origin
        {
            if let Some(left) = selection.maximum.as_mut() {
                *left = left.saturating_sub(1);
            }
            self.context.collision_detected = next_will_collide;
            self.context.origin = Some(next);
            self.context.coordinates = next;
            self.editing = if next == committed {
                EditingState::Resetting
            } else {
                EditingState::Placing
            };
        } else if selection.action.is_one_shot() {
            self.context.selection = None;
            self.saving = SavingState::Done;
            self.editing = EditingState::Done;
        } else {
            self.context.selection = None;
            self.editing = EditingState::Idle;
        }
        true
    }

    /// Runs the eventless transitions until none applies.
    fn settle(&mut self) {
        loop {
            match self.editing {
                EditingState::Idle if self.context.selection.is_some() => {
                    self.editing = EditingState::Placing;
                }
                EditingState::Resetting => {
                    let Coordinates { x, y } = self.context.coordinates;
                    self.context.coordinates = Coordinates::new(x, y - 1);
                    self.editing = EditingState::Placing;
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{
        Action, ActionTag, BuyDecorationAction, PlaceAction, Placement, RemoveAction,
    };
    use crate::state::{ObjectId, Snapshot, Timestamp};

    fn placing(selection: Selection, at: Coordinates) -> LandscapingMachine {
        let mut machine =
            LandscapingMachine::with_context(WorkflowContext::with_selection(selection));
        machine.context.coordinates = at;
        machine
    }

    fn save_request() -> SaveRequest {
        SaveRequest {
            snapshot: Snapshot::default(),
            actions: Vec::new(),
            credentials: SaveCredentials::default(),
        }
    }

    fn dispatched(reaction: &Reaction) -> Vec<&Action> {
        reaction
            .effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Dispatch(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn existing_selection_enters_placing() {
        let machine = LandscapingMachine::with_context(WorkflowContext::with_selection(
            Selection::new("Gnome", ActionTag::Place),
        ));
        assert_eq!(machine.editing, EditingState::Placing);
        assert_eq!(LandscapingMachine::new().editing, EditingState::Idle);
    }

    #[test]
    fn multi_place_commits_and_keeps_placing() {
        let mut ids = SequentialIds::new("p");
        let machine = placing(
            Selection::new("Tree", ActionTag::Place).multiple(Some(3)),
            Coordinates::new(1, 1),
        );

        let (next, reaction) = machine.transition(
            WorkflowEvent::Place {
                next_origin: Some(Coordinates::new(2, 1)),
                next_will_collide: true,
            },
            &mut ids,
        );

        assert_eq!(
            dispatched(&reaction),
            vec![&Action::from(PlaceAction::new(
                "Tree",
                Placement::new("p1", Coordinates::new(1, 1))
            ))]
        );
        assert_eq!(next.editing, EditingState::Placing);
        assert_eq!(next.context.coordinates, Coordinates::new(2, 1));
        assert_eq!(next.context.origin, Some(Coordinates::new(2, 1)));
        assert!(next.context.collision_detected);
        assert_eq!(next.context.selection.as_ref().unwrap().maximum, Some(2));
        // The input machine is untouched.
        assert_eq!(machine.context.coordinates, Coordinates::new(1, 1));
    }

    #[test]
    fn last_quota_slot_keeps_placing_then_exhausts() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(
            Selection::new("Tree", ActionTag::Place).multiple(Some(1)),
            Coordinates::new(0, 0),
        );

        let reaction = machine.send(
            WorkflowEvent::Place {
                next_origin: Some(Coordinates::new(1, 0)),
                next_will_collide: false,
            },
            &mut ids,
        );

        assert_eq!(dispatched(&reaction).len(), 1);
        assert_eq!(machine.editing, EditingState::Placing);
        assert_eq!(machine.context.coordinates, Coordinates::new(1, 0));
        assert_eq!(machine.context.selection.as_ref().unwrap().maximum, Some(0));

        // No placements left: the next commit ends the run.
        let reaction = machine.send(
            WorkflowEvent::Place {
                next_origin: Some(Coordinates::new(2, 0)),
                next_will_collide: false,
            },
            &mut ids,
        );

        assert_eq!(dispatched(&reaction).len(), 1);
        assert_eq!(machine.editing, EditingState::Idle);
        assert!(machine.context.selection.is_none());
    }

    #[test]
    fn offering_the_same_slot_steps_back_one_cell() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(
            Selection::new("Tree", ActionTag::Place).multiple(None),
            Coordinates::new(4, 4),
        );

        machine.send(
            WorkflowEvent::Place {
                next_origin: Some(Coordinates::new(4, 4)),
                next_will_collide: false,
            },
            &mut ids,
        );

        assert_eq!(machine.editing, EditingState::Placing);
        assert_eq!(machine.context.coordinates, Coordinates::new(4, 3));
    }

    #[test]
    fn one_shot_purchase_finishes_session() {
        let mut ids = SequentialIds::new("b");
        let mut machine = placing(
            Selection::new("Gnome", ActionTag::BuyDecoration),
            Coordinates::new(3, 3),
        );

        let reaction = machine.send(
            WorkflowEvent::Place {
                next_origin: None,
                next_will_collide: false,
            },
            &mut ids,
        );

        assert_eq!(
            dispatched(&reaction),
            vec![&Action::from(BuyDecorationAction::placed(
                "Gnome",
                Placement::new("b1", Coordinates::new(3, 3))
            ))]
        );
        assert!(machine.is_done());
    }

    #[test]
    fn single_place_returns_to_idle() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(Selection::new("Gnome", ActionTag::Place), Coordinates::ORIGIN);

        machine.send(
            WorkflowEvent::Place {
                next_origin: Some(Coordinates::new(1, 0)),
                next_will_collide: false,
            },
            &mut ids,
        );

        assert_eq!(machine.editing, EditingState::Idle);
        assert_eq!(machine.saving, SavingState::Idle);
        assert!(machine.context.selection.is_none());
    }

    #[test]
    fn drag_and_drop_track_coordinates() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(Selection::new("Gnome", ActionTag::Place), Coordinates::ORIGIN);

        machine.send(WorkflowEvent::Drag, &mut ids);
        assert_eq!(machine.editing, EditingState::Dragging);
        machine.send(
            WorkflowEvent::Update {
                coordinates: Coordinates::new(6, 2),
                collision_detected: true,
            },
            &mut ids,
        );
        machine.send(WorkflowEvent::Drop, &mut ids);

        assert_eq!(machine.editing, EditingState::Placing);
        assert_eq!(machine.context.coordinates, Coordinates::new(6, 2));
        assert!(machine.context.collision_detected);
    }

    #[test]
    fn back_clears_selection() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(Selection::new("Gnome", ActionTag::Place), Coordinates::ORIGIN);

        machine.send(WorkflowEvent::Back, &mut ids);

        assert_eq!(machine.editing, EditingState::Idle);
        assert!(machine.context.selection.is_none());
    }

    #[test]
    fn remove_dispatches_and_releases_grab() {
        let mut ids = SequentialIds::default();
        let mut machine = LandscapingMachine::new();

        machine.send(
            WorkflowEvent::Move {
                name: "Gnome".into(),
                id: ObjectId::from("g1"),
            },
            &mut ids,
        );
        assert!(machine.context.moving.is_some());

        let reaction = machine.send(
            WorkflowEvent::Remove {
                name: "Gnome".into(),
                id: ObjectId::from("g1"),
            },
            &mut ids,
        );

        assert_eq!(
            dispatched(&reaction),
            vec![&Action::from(RemoveAction::new("Gnome", "g1"))]
        );
        assert!(machine.context.moving.is_none());
        assert_eq!(machine.editing, EditingState::Idle);
    }

    #[test]
    fn cancel_ends_both_regions_mid_save_and_drag() {
        let mut ids = SequentialIds::default();
        let mut machine = placing(Selection::new("Gnome", ActionTag::Place), Coordinates::ORIGIN);
        machine.send(WorkflowEvent::Save(save_request()), &mut ids);
        machine.send(WorkflowEvent::Drag, &mut ids);
        assert_eq!(machine.saving, SavingState::Autosaving);
        assert_eq!(machine.editing, EditingState::Dragging);

        let cancelled = machine.send(WorkflowEvent::Cancel, &mut ids);
        assert!(cancelled.handled);
        assert!(machine.is_done());

        let frozen = machine.clone();
        for event in [WorkflowEvent::Save(save_request()), WorkflowEvent::Drag] {
            let reaction = machine.send(event, &mut ids);
            assert!(!reaction.handled);
            assert!(reaction.effects.is_empty());
        }
        assert_eq!(machine, frozen);
    }

    #[test]
    fn second_save_while_in_flight_is_dropped() {
        let mut ids = SequentialIds::default();
        let mut machine = LandscapingMachine::new();

        let first = machine.send(WorkflowEvent::Save(save_request()), &mut ids);
        let second = machine.send(WorkflowEvent::Save(save_request()), &mut ids);

        assert!(matches!(first.effects.as_slice(), [Effect::Persist(_)]));
        assert!(!second.handled);
        assert!(second.effects.is_empty());
    }

    #[test]
    fn save_outcomes_return_to_idle() {
        let mut ids = SequentialIds::default();
        let mut machine = LandscapingMachine::new();
        let receipt = SaveReceipt {
            revision: 1,
            saved_at: Timestamp::from_millis(5),
            actions: 0,
        };

        machine.send(WorkflowEvent::Save(save_request()), &mut ids);
        let done = machine.send(WorkflowEvent::SaveSucceeded(receipt.clone()), &mut ids);
        assert_eq!(done.effects, vec![Effect::SaveCompleted(receipt)]);
        assert_eq!(machine.saving, SavingState::Idle);

        machine.send(WorkflowEvent::Save(save_request()), &mut ids);
        let failed = machine.send(
            WorkflowEvent::SaveFailed {
                reason: "offline".into(),
            },
            &mut ids,
        );
        assert_eq!(failed.effects, vec![Effect::SaveFailed("offline".into())]);
        assert_eq!(machine.saving, SavingState::Idle);
    }

    #[test]
    fn events_without_transition_are_ignored() {
        let mut ids = SequentialIds::default();
        let mut machine = LandscapingMachine::new();
        let before = machine.clone();

        for event in [
            WorkflowEvent::Drop,
            WorkflowEvent::Back,
            WorkflowEvent::Place {
                next_origin: None,
                next_will_collide: false,
            },
            WorkflowEvent::SaveFailed {
                reason: "late".into(),
            },
            WorkflowEvent::Update {
                coordinates: Coordinates::new(1, 1),
                collision_detected: false,
            },
        ] {
            assert!(!machine.send(event, &mut ids).handled);
        }
        assert_eq!(machine, before);
    }
}
