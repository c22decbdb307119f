//! In-memory key-value backend
//!
//! Behaves like browser storage, including its quota and the host switching
//! storage off, so failure handling can be exercised without a browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{FailureKind, Result, StorageUnavailable};

/// Size of an entry as browsers count it (UTF-16 code units of key + value)
fn entry_size(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    /// Maximum total entry size, `None` for unbounded
    quota: Option<usize>,
    /// Cleared to simulate the host disabling storage
    denied: Cell<bool>,
}

impl MemoryStore {
    /// Unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once `quota` UTF-16 units are in use
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    /// Enable or disable access, like a host toggling storage permissions
    pub fn set_accessible(&self, accessible: bool) {
        self.denied.set(!accessible);
    }

    pub fn is_accessible(&self) -> bool {
        !self.denied.get()
    }

    /// Total size of all entries in UTF-16 units
    pub fn used(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| entry_size(k, v))
            .sum()
    }

    /// Snapshot of all keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn check_access(&self, key: &str) -> Result<()> {
        if self.denied.get() {
            return Err(StorageUnavailable::new(
                key,
                FailureKind::AccessDenied,
                "storage access is disabled",
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn raw_get(&self, key: &str) -> Option<String> {
        if self.denied.get() {
            log::debug!("Read of `{}` skipped, storage access is disabled", key);
            return None;
        }
        self.entries.borrow().get(key).cloned()
    }

    fn raw_set(&self, key: &str, value: &str) -> Result<()> {
        self.check_access(key)?;

        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .borrow()
                .get(key)
                .map(|old| entry_size(key, old))
                .unwrap_or(0);
            let needed = self.used() - replaced + entry_size(key, value);
            if needed > quota {
                return Err(StorageUnavailable::new(
                    key,
                    FailureKind::QuotaExceeded,
                    format!("{} of {} units needed", needed, quota),
                ));
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn raw_remove(&self, key: &str) -> Result<()> {
        self.check_access(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
