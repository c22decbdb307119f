//! Safe Store - failure-contained browser persistence
//!
//! Core modules:
//! - `persistence`: `SafeStore` string/JSON access with fallbacks
//! - `platform`: key-value backends (LocalStorage, SessionStorage, memory)
//! - `config`: backend selection
//! - `error`: storage medium failures

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use config::{Backend, StoreConfig, open_store};
pub use error::{FailureKind, StorageUnavailable};
pub use persistence::{Decoded, Persisted, SafeStore};
pub use platform::{KeyValueStore, MemoryStore};

/// Storage constants
pub mod consts {
    /// Stored in place of a value that cannot be serialized
    pub const NULL_SENTINEL: &str = "null";

    /// Typical per-origin LocalStorage quota in UTF-16 units
    pub const BROWSER_QUOTA_UNITS: usize = 5 * 1024 * 1024;
}
