//! Store configuration
//!
//! Picks which storage medium backs a `SafeStore`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::SafeStore;
use crate::platform::{KeyValueStore, MemoryStore};

/// Storage medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Backend {
    /// `window.localStorage`, survives reloads and restarts
    #[default]
    Local,
    /// `window.sessionStorage`, scoped to the tab
    Session,
    /// Process memory, lost on exit
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Local => "local",
            Backend::Session => "session",
            Backend::Memory => "memory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" | "localstorage" => Some(Backend::Local),
            "session" | "sessionstorage" => Some(Backend::Session),
            "memory" | "mem" => Some(Backend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Quota for the memory backend in UTF-16 units, `None` for unbounded
    pub memory_quota: Option<usize>,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            memory_quota: None,
        }
    }

    fn memory_store(&self) -> MemoryStore {
        match self.memory_quota {
            Some(quota) => MemoryStore::with_quota(quota),
            None => MemoryStore::new(),
        }
    }
}

pub type DynStore = SafeStore<Box<dyn KeyValueStore>>;

/// Open the configured backend
#[cfg(target_arch = "wasm32")]
pub fn open_store(config: &StoreConfig) -> Result<DynStore> {
    use crate::platform::WebStorage;

    let backend: Box<dyn KeyValueStore> = match config.backend {
        Backend::Local => Box::new(WebStorage::local()?),
        Backend::Session => Box::new(WebStorage::session()?),
        Backend::Memory => Box::new(config.memory_store()),
    };
    log::info!("Opened {} storage", config.backend.as_str());
    Ok(SafeStore::new(backend))
}

/// Open the configured backend; browser backends fall back to memory natively
#[cfg(not(target_arch = "wasm32"))]
pub fn open_store(config: &StoreConfig) -> Result<DynStore> {
    if config.backend != Backend::Memory {
        log::info!(
            "No {} storage on native targets, using memory",
            config.backend.as_str()
        );
    }
    Ok(SafeStore::new(Box::new(config.memory_store())))
}
