//! Store adapter: four named records in a string-keyed durable store.

use std::collections::HashMap;

use crate::model::PollError;

pub const USERS_KEY: &str = "users";
pub const POLLS_KEY: &str = "polls";
pub const VOTES_KEY: &str = "votes";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// A string-keyed store for serialized records.
///
/// The application reads the four records once at startup and writes all of
/// them back after every mutation. Implementations decide durability: the
/// `facvote` binary keeps one JSON file per key, tests use [MemoryStore].
pub trait KeyValueStore {
    /// Returns the serialized record for this key, or `None` if the record
    /// was never written.
    fn read_record(&self, key: &str) -> Result<Option<String>, PollError>;

    fn write_record(&mut self, key: &str, value: &str) -> Result<(), PollError>;
}

/// In-memory store with no durability. Used in tests and embeddings that do
/// not need persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_record(&self, key: &str) -> Result<Option<String>, PollError> {
        Ok(self.records.get(key).cloned())
    }

    fn write_record(&mut self, key: &str, value: &str) -> Result<(), PollError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
