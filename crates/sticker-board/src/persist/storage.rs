//! Key-Value Storage
//!
//! Synchronous string slots, the shape of the browser's local storage.

use std::collections::HashMap;

use crate::domain::{DomainError, DomainResult};

pub trait KeyValueStore {
    /// `Ok(None)` when the slot was never written
    fn read(&self, key: &str) -> DomainResult<Option<String>>;

    /// Replaces the slot's value
    fn write(&mut self, key: &str, value: &str) -> DomainResult<()>;
}

/// In-memory store, also counts writes
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    writes: usize,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail, like a full quota
    pub fn read_only() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> DomainResult<()> {
        if self.reject_writes {
            return Err(DomainError::Storage(format!("quota exceeded writing {:?}", key)));
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
