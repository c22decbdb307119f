//! Platform abstraction layer
//!
//! Handles browser/native differences for storage:
//! - `MemoryStore` on every target (tests, native builds)
//! - `WebStorage` over LocalStorage/SessionStorage on web

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

use std::rc::Rc;

use crate::error::Result;

/// A flat string-keyed, string-valued persistent store.
///
/// Calls are synchronous and happen on one thread, so methods take `&self`
/// and backends that own their data use interior mutability.
pub trait KeyValueStore {
    /// Current value for `key`, or `None` when absent or unreadable
    fn raw_get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the write.
    fn raw_set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the removal.
    fn raw_remove(&self, key: &str) -> Result<()>;

    /// Number of entries currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn raw_get(&self, key: &str) -> Option<String> {
        (**self).raw_get(key)
    }

    fn raw_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).raw_set(key, value)
    }

    fn raw_remove(&self, key: &str) -> Result<()> {
        (**self).raw_remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn raw_get(&self, key: &str) -> Option<String> {
        (**self).raw_get(key)
    }

    fn raw_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).raw_set(key, value)
    }

    fn raw_remove(&self, key: &str) -> Result<()> {
        (**self).raw_remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn raw_get(&self, key: &str) -> Option<String> {
        (**self).raw_get(key)
    }

    fn raw_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).raw_set(key, value)
    }

    fn raw_remove(&self, key: &str) -> Result<()> {
        (**self).raw_remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
