//! Key-value storage port
//!
//! The game persists exactly one value (the high score), so storage is a
//! plain string get/set interface. Backends:
//! - [`MemoryStore`]: in-process map (tests, native demo)
//! - `platform::storage::LocalStorageStore`: browser LocalStorage (wasm)

use std::collections::HashMap;
use std::fmt;

/// Storage failures. Callers treat all of them as non-fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend not reachable (no window, storage disabled, ...)
    Unavailable,
    /// Backend refused the write (quota, private mode, ...)
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::Rejected(reason) => write!(f, "storage rejected write: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
