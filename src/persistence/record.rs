//! Typed records persisted under a fixed key
//!
//! Settings, leaderboards and similar single-document state implement
//! `Persisted` and get load/save/clear for free.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Decoded, SafeStore};
use crate::error::Result;
use crate::platform::KeyValueStore;

pub trait Persisted: Serialize + DeserializeOwned + Default {
    /// Storage key for this record
    const STORAGE_KEY: &'static str;

    /// Load the record, or `Default` when missing or corrupt
    fn load<S: KeyValueStore>(store: &SafeStore<S>) -> Self {
        match store.inspect_json(Self::STORAGE_KEY) {
            Decoded::Value(record) => {
                log::info!("Loaded `{}`", Self::STORAGE_KEY);
                record
            }
            Decoded::Missing => {
                log::info!("No `{}` found, using defaults", Self::STORAGE_KEY);
                Self::default()
            }
            Decoded::Corrupt => {
                log::warn!("Stored `{}` is unreadable, using defaults", Self::STORAGE_KEY);
                Self::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the write.
    fn save<S: KeyValueStore>(&self, store: &SafeStore<S>) -> Result<()> {
        store.set_json(Self::STORAGE_KEY, self)?;
        log::info!("Saved `{}`", Self::STORAGE_KEY);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the removal.
    fn clear<S: KeyValueStore>(store: &SafeStore<S>) -> Result<()> {
        store.remove(Self::STORAGE_KEY)?;
        log::info!("Cleared `{}`", Self::STORAGE_KEY);
        Ok(())
    }
}
