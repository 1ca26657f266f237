//! Shared in-memory key-value store.
//!
//! [`Store`] is the only mutable state shared between sessions. It wraps a
//! `HashMap` behind a single `RwLock` and exposes nothing but the four
//! protocol operations, so every execution unit passes through the same
//! serialization point.
//!
//! # Exclusivity
//!
//! - [`Store::write`] and [`Store::delete`] hold the write lock for the
//!   duration of one operation.
//! - [`Store::read`] and [`Store::count`] hold the read lock.
//! - No lock is ever held across more than one operation, and never across
//!   network I/O.
//!
//! Cloning a `Store` is cheap and yields a handle to the same map.
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key -> value`, overwriting any previous value.
    pub fn write(&self, key: String, value: String) {
        self.exclusive().insert(key, value);
    }

    /// Returns a copy of the value stored under `key`.
    pub fn read(&self, key: &str) -> Option<String> {
        self.shared().get(key).cloned()
    }

    /// Number of keys currently present.
    pub fn count(&self) -> usize {
        self.shared().len()
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.exclusive().remove(key).is_some()
    }

    // A panic inside any critical section here cannot leave the map half
    // mutated, so a poisoned lock is still safe to use.
    fn shared(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
