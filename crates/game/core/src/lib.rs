//! Deterministic game logic and data types shared across clients.
//!
//! `landscape-core` defines the canonical rules (ledger, actions, engine,
//! placement workflow) and exposes pure APIs that can be reused by both the
//! runtime and offline tools. All snapshot mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod ledger;
pub mod spatial;
pub mod state;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use action::{
    Action, ActionError, ActionTag, ActionTransition, AppliedAction, BuyDecorationAction,
    ConstructBuildingAction, CraftCollectibleAction, EconomicEvent, MoveAction, PlaceAction,
    Placement, RemoveAction,
};
pub use config::{GameConfig, SpatialIndexKind};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, ReplayReport, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    CatalogOracle, CatalogSnapshot, Dimensions, Env, GameEnv, Ingredient, ItemDefinition,
    OracleError,
};
pub use error::{ErrorSeverity, GameError};
pub use ledger::{Inventory, LedgerError, Quantity};
pub use spatial::{CollisionDetector, Footprint, GridIndex, LinearScan};
pub use state::{
    Activity, Bumpkin, Coordinates, InvariantViolation, ItemName, ObjectId, ObjectRef,
    PlaceableCategory, PlacedObject, PlacedObjects, Snapshot, StateError, Timestamp,
};
pub use workflow::{
    EditingState, Effect, IdGenerator, LandscapingMachine, Reaction, Requirements, SaveCredentials,
    SaveReceipt, SaveRequest, SavingState, Selection, SequentialIds, WorkflowContext,
    WorkflowEvent,
};
