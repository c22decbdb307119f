//! JavaScript bindings (WASM only)
//!
//! Exposes `SafeStore` to page scripts with the same fallback and failure
//! rules as the Rust API. JSON goes through the browser's own `JSON` object
//! so any JS value can be stored.

use js_sys::JSON;
use wasm_bindgen::prelude::*;

use crate::config::{Backend, DynStore, StoreConfig, open_store};
use crate::consts::NULL_SENTINEL;
use crate::error::StorageUnavailable;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialised when the host page set up its own logger
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: StorageUnavailable) -> JsValue {
    JsError::new(&err.to_string()).into()
}

#[wasm_bindgen]
extern "C" {
    /// The global `String` conversion function
    #[wasm_bindgen(js_name = String)]
    fn js_string(value: &JsValue) -> String;
}

/// `String(value)`
fn js_to_text(value: &JsValue) -> String {
    match value.as_string() {
        Some(text) => text,
        None => js_string(value),
    }
}

/// `undefined` stands for an omitted fallback, which defaults to `null`
fn fallback_or_null(fallback: JsValue) -> JsValue {
    if fallback.is_undefined() {
        JsValue::NULL
    } else {
        fallback
    }
}

/// `JSON.stringify(value)`, or `"null"` when it throws or yields `undefined`
fn js_to_json(value: &JsValue) -> String {
    let json = match JSON::stringify(value) {
        Ok(json) => json.as_string(),
        Err(err) => {
            log::warn!("Value not serializable, storing null instead: {:?}", err);
            None
        }
    };
    json.unwrap_or_else(|| NULL_SENTINEL.to_string())
}

#[wasm_bindgen(js_name = SafeStore)]
pub struct JsSafeStore {
    inner: DynStore,
}

#[wasm_bindgen(js_class = SafeStore)]
impl JsSafeStore {
    /// `new SafeStore("local" | "session" | "memory")`, LocalStorage by default
    #[wasm_bindgen(constructor)]
    pub fn new(backend: Option<String>) -> Result<JsSafeStore, JsValue> {
        let backend = match backend.as_deref() {
            None => Backend::default(),
            Some(name) => Backend::from_str(name)
                .ok_or_else(|| JsError::new(&format!("unknown storage backend `{}`", name)))?,
        };
        let config = StoreConfig {
            backend,
            ..StoreConfig::default()
        };
        let inner = open_store(&config).map_err(to_js)?;
        Ok(Self { inner })
    }

    pub fn get(&self, key: &str, fallback: JsValue) -> JsValue {
        self.inner
            .get(key)
            .map(JsValue::from)
            .unwrap_or_else(|| fallback_or_null(fallback))
    }

    pub fn set(&self, key: &str, value: &JsValue) -> Result<(), JsValue> {
        self.inner.set(key, js_to_text(value)).map_err(to_js)
    }

    pub fn remove(&self, key: &str) -> Result<(), JsValue> {
        self.inner.remove(key).map_err(to_js)
    }

    #[wasm_bindgen(js_name = getJSON)]
    pub fn get_json(&self, key: &str, fallback: JsValue) -> JsValue {
        self.inner
            .get(key)
            .and_then(|raw| JSON::parse(&raw).ok())
            .unwrap_or_else(|| fallback_or_null(fallback))
    }

    #[wasm_bindgen(js_name = setJSON)]
    pub fn set_json(&self, key: &str, value: &JsValue) -> Result<(), JsValue> {
        self.inner.set(key, js_to_json(value)).map_err(to_js)
    }
}
