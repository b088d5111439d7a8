//! Spatial index and collision detection.
//!
//! Every placed object's footprint is derived from its kind's catalog
//! dimensions. A candidate footprint collides when it overlaps any of them
//! on a strict axis-aligned test, so boxes that merely share an edge do not
//! collide.
//!
//! Reducers depend only on [`CollisionDetector`]; [`detector`] picks the
//! implementation named by [`SpatialIndexKind`].
mod grid;
mod linear;

pub use grid::GridIndex;
pub use linear::LinearScan;

use crate::config::SpatialIndexKind;
use crate::env::{CatalogOracle, Dimensions};
use crate::state::{Coordinates, ItemName, ObjectId, ObjectRef, PlaceableCategory, Snapshot};

/// Axis-aligned bounding box on the grid.
///
/// `left = x`, `right = x + width`, `top = y`, `bottom = y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn at(coordinates: Coordinates, dimensions: Dimensions) -> Self {
        Self::new(
            coordinates.x,
            coordinates.y,
            dimensions.width,
            dimensions.height,
        )
    }

    pub const fn left(&self) -> i64 {
        self.x as i64
    }

    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub const fn top(&self) -> i64 {
        self.y as i64
    }

    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub const fn overlaps(&self, other: &Footprint) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// A placed object as seen by the spatial index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub category: PlaceableCategory,
    pub name: ItemName,
    pub id: ObjectId,
    pub footprint: Footprint,
}

impl Occupant {
    fn is(&self, object: &ObjectRef) -> bool {
        self.name == object.name && self.id == object.id
    }
}

/// Answers "does this box overlap anything already placed?".
pub trait CollisionDetector {
    /// First occupant overlapping `candidate`, ignoring `exclude`.
    fn first_collision(
        &self,
        candidate: &Footprint,
        exclude: Option<&ObjectRef>,
    ) -> Option<&Occupant>;

    fn collides(&self, candidate: &Footprint, exclude: Option<&ObjectRef>) -> bool {
        self.first_collision(candidate, exclude).is_some()
    }
}

/// Collects every placed object with its footprint.
///
/// Kinds the catalog has no dimensions for occupy a single cell.
pub fn occupants<C>(snapshot: &Snapshot, catalog: &C) -> Vec<Occupant>
where
    C: CatalogOracle + ?Sized,
{
    snapshot
        .placed
        .iter()
        .map(|(category, name, object)| Occupant {
            category,
            name: name.clone(),
            id: object.id.clone(),
            footprint: Footprint::at(
                object.coordinates,
                catalog.dimensions(name).unwrap_or(Dimensions::UNIT),
            ),
        })
        .collect()
}

/// Builds the detector selected by `kind` over `snapshot`.
pub fn detector<C>(
    kind: SpatialIndexKind,
    snapshot: &Snapshot,
    catalog: &C,
) -> Box<dyn CollisionDetector>
where
    C: CatalogOracle + ?Sized,
{
    match kind {
        SpatialIndexKind::LinearScan => Box::new(LinearScan::from_snapshot(snapshot, catalog)),
        SpatialIndexKind::Grid { cell_size } => {
            Box::new(GridIndex::from_snapshot(snapshot, catalog, cell_size))
        }
    }
}
