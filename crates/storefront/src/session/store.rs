//! Key-value persistence for session data.
//!
//! The session survives a reload by writing the current identity into a
//! string key-value store (browser local storage in the UI). The store is a
//! collaborator; [`MemoryStore`] backs tests and the CLI.

use std::collections::HashMap;

/// String key-value storage the session writes through to.
pub trait KeyValueStore {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);

    /// Delete `key`. Absent keys are ignored.
    fn remove(&mut self, key: &str);
}

/// In-process [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
