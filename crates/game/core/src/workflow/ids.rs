use crate::state::ObjectId;

/// Source of fresh object identifiers for committed placements.
pub trait IdGenerator {
    fn next_id(&mut self) -> ObjectId;
}

/// Deterministic ids: `prefix` followed by a counter.
///
/// Replays and tests use this so the same event sequence always commits the
/// same ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("obj")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ObjectId {
        let id = ObjectId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> ObjectId {
        (**self).next_id()
    }
}
