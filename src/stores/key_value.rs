//! Defines the key-value store trait and an in-memory implementation.

use std::collections::HashMap;

use crate::Error;

/// A string keyed store of string values that the ledger is persisted to.
///
/// Implementations are treated as opaque: the ledger reads its snapshot key,
/// and the key holding the last issued ID, when it starts and overwrites both
/// after every change.
pub trait KeyValueStore {
    /// Retrieve the value for `key`, or `None` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Set `key` to `value`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Keeps values in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
