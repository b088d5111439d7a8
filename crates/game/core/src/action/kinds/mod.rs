mod buy;
mod construct;
mod craft;
mod movement;
mod place;
mod remove;

pub use buy::BuyDecorationAction;
pub use construct::ConstructBuildingAction;
pub use craft::CraftCollectibleAction;
pub use movement::MoveAction;
pub use place::PlaceAction;
pub use remove::RemoveAction;
