//! Object id generation for live sessions.
use landscape_core::{IdGenerator, ObjectId};
use uuid::Uuid;

/// Prefix of a random v4 UUID in its simple (hyphen-free) form.
#[derive(Debug, Clone, Copy)]
pub struct UuidIds {
    length: usize,
}

impl UuidIds {
    pub const DEFAULT_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 32;

    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, Self::MAX_LENGTH),
        }
    }
}

impl Default for UuidIds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ObjectId {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(self.length);
        ObjectId::from(id)
    }
}
