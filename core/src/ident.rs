//! Identity seam — supplies fresh entity ids for new records.
//!
//! Uniqueness within the dataset's lifetime is the only requirement;
//! UUID v4 is the production scheme. Tests use SeqIdGen for stable,
//! readable ids.

use crate::types::EntityId;
use uuid::Uuid;

pub trait IdGen: Send {
    fn next_id(&mut self) -> EntityId;
}

pub struct UuidGen;

impl IdGen for UuidGen {
    fn next_id(&mut self) -> EntityId {
        Uuid::new_v4().to_string()
    }
}

/// Sequential ids with a fixed prefix: "t-1", "t-2", ...
pub struct SeqIdGen {
    prefix: String,
    counter: u64,
}

impl SeqIdGen {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }
}

impl IdGen for SeqIdGen {
    fn next_id(&mut self) -> EntityId {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}
