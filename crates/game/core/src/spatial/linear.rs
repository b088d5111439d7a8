use super::{CollisionDetector, Footprint, Occupant, occupants};
use crate::env::CatalogOracle;
use crate::state::{ObjectRef, Snapshot};

/// Tests a candidate against every placed object.
///
/// Linear per query. Player worlds hold tens to low hundreds of objects, so
/// this is the default.
#[derive(Clone, Debug, Default)]
pub struct LinearScan {
    occupants: Vec<Occupant>,
}

impl LinearScan {
    pub fn new(occupants: Vec<Occupant>) -> Self {
        Self { occupants }
    }

    pub fn from_snapshot<C>(snapshot: &Snapshot, catalog: &C) -> Self
    where
        C: CatalogOracle + ?Sized,
    {
        Self::new(occupants(snapshot, catalog))
    }
}

impl CollisionDetector for LinearScan {
    fn first_collision(
        &self,
        candidate: &Footprint,
        exclude: Option<&ObjectRef>,
    ) -> Option<&Occupant> {
        self.occupants.iter().find(|occupant| {
            !exclude.is_some_and(|excluded| occupant.is(excluded))
                && occupant.footprint.overlaps(candidate)
        })
    }
}
