//! Browser LocalStorage/SessionStorage backend (WASM only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

use super::KeyValueStore;
use crate::error::{FailureKind, Result, StorageUnavailable};

/// Classify a value thrown by the Storage API
fn failure_kind(err: &JsValue) -> FailureKind {
    match err.dyn_ref::<DomException>().map(|e| e.name()) {
        Some(name) if name == "QuotaExceededError" || name == "NS_ERROR_DOM_QUOTA_REACHED" => {
            FailureKind::QuotaExceeded
        }
        Some(name) if name == "SecurityError" => FailureKind::AccessDenied,
        _ => FailureKind::Other,
    }
}

fn describe(err: &JsValue) -> String {
    match err.dyn_ref::<DomException>() {
        Some(e) => format!("{}: {}", e.name(), e.message()),
        None => format!("{:?}", err),
    }
}

fn to_failure(key: &str, err: JsValue) -> StorageUnavailable {
    StorageUnavailable::new(key, failure_kind(&err), describe(&err))
}

/// Handle on `window.localStorage` or `window.sessionStorage`
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// `window.localStorage`
    pub fn local() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageUnavailable::opening(FailureKind::NoStorage, "no window"))?;
        Self::resolve(window.local_storage(), "localStorage")
    }

    /// `window.sessionStorage`
    pub fn session() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageUnavailable::opening(FailureKind::NoStorage, "no window"))?;
        Self::resolve(window.session_storage(), "sessionStorage")
    }

    fn resolve(
        storage: std::result::Result<Option<Storage>, JsValue>,
        name: &str,
    ) -> Result<Self> {
        match storage {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageUnavailable::opening(
                FailureKind::NoStorage,
                format!("{} is not available", name),
            )),
            Err(err) => Err(StorageUnavailable::opening(
                FailureKind::AccessDenied,
                describe(&err),
            )),
        }
    }
}

impl KeyValueStore for WebStorage {
    fn raw_get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("Read of `{}` failed: {}", key, describe(&err));
                None
            }
        }
    }

    fn raw_set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| to_failure(key, err))
    }

    fn raw_remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| to_failure(key, err))
    }

    fn len(&self) -> usize {
        self.storage.length().map(|n| n as usize).unwrap_or(0)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_storage_round_trip() {
        let store = WebStorage::session().unwrap();
        store.raw_set("safe_store_test", "dark").unwrap();
        assert_eq!(store.raw_get("safe_store_test").as_deref(), Some("dark"));
        store.raw_remove("safe_store_test").unwrap();
        assert_eq!(store.raw_get("safe_store_test"), None);
    }

    #[wasm_bindgen_test]
    fn test_non_dom_exception_is_other() {
        assert_eq!(failure_kind(&JsValue::from_str("boom")), FailureKind::Other);
    }
}
