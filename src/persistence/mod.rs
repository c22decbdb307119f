//! Failure-contained persistence over a key-value store
//!
//! Features:
//! - Raw string entries with caller-supplied fallbacks
//! - JSON entries that fall back on missing or corrupt data
//! - Unserializable values stored as `null`, never as a partial write
//! - Medium failures (quota, denied access) returned to the caller
//! - Typed records with a fixed key (`Persisted`)

pub mod codec;
pub mod record;

pub use codec::{Decoded, decode_json, encode_json};
pub use record::Persisted;

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::platform::KeyValueStore;

/// Total string and JSON access to a shared key-value store.
///
/// Holds no state of its own between calls. Reads never fail; writes fail
/// only when the underlying medium refuses them.
#[derive(Debug, Clone, Default)]
pub struct SafeStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SafeStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Current raw value for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.backend.raw_get(key)
    }

    /// Current raw value for `key`, or `fallback` when absent
    pub fn get_or(&self, key: &str, fallback: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| fallback.into())
    }

    /// Store the textual form of `value` under `key`.
    ///
    /// Strings are stored verbatim; numbers and booleans use their
    /// locale-independent `Display` form (`42`, `1.5`, `true`).
    ///
    /// Floats never switch to exponent notation: `1e21` is written as
    /// `1000000000000000000000`, where JS `String(1e21)` gives `1e+21`.
    /// Keys written from both Rust and JS should hold strings or integers.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the write.
    pub fn set(&self, key: &str, value: impl Display) -> Result<()> {
        let text = value.to_string();
        self.backend.raw_set(key, &text).inspect_err(|e| {
            log::warn!("Write failed: {}", e);
        })
    }

    /// Delete `key`; absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the removal.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.raw_remove(key).inspect_err(|e| {
            log::warn!("Remove failed: {}", e);
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Decode the entry under `key`, reporting whether it was missing or corrupt
    pub fn inspect_json<T: DeserializeOwned>(&self, key: &str) -> Decoded<T> {
        decode_json(self.get(key).as_deref())
    }

    /// Parsed JSON entry under `key`, or `fallback` when absent or unparseable.
    ///
    /// Use `serde_json::Value` as `T` to accept any JSON structure.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.inspect_json(key).or(fallback)
    }

    /// Like `get_json`, building the fallback only when it is needed
    pub fn get_json_or_else<T: DeserializeOwned>(
        &self,
        key: &str,
        fallback: impl FnOnce() -> T,
    ) -> T {
        self.inspect_json(key).or_else(fallback)
    }

    pub fn get_json_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get_json_or_else(key, T::default)
    }

    /// Store `value` as JSON under `key`.
    ///
    /// A value that cannot be serialized is stored as `null`, so the entry
    /// always holds parseable JSON.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the medium refuses the write.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = encode_json(value);
        self.set(key, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::platform::MemoryStore;
    use serde::{Deserialize, Serializer};
    use serde_json::{Value, json};
    use std::rc::Rc;

    fn store() -> SafeStore<MemoryStore> {
        SafeStore::new(MemoryStore::new())
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        volume: u8,
        theme: String,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(
            &self,
            _serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            use serde::ser::Error;
            Err(S::Error::custom("cycle"))
        }
    }

    #[test]
    fn test_theme_scenario() {
        let store = store();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get_or("theme", "light"), "dark");
        store.remove("theme").unwrap();
        assert_eq!(store.get_or("theme", "light"), "light");
    }

    #[test]
    fn test_prefs_scenario() {
        let store = store();
        store.set_json("prefs", &json!({"volume": 7})).unwrap();
        assert_eq!(store.get_json("prefs", json!({})), json!({"volume": 7}));
    }

    #[test]
    fn test_get_absent_uses_fallback() {
        let store = store();
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.get_or("missing", "f"), "f");
        assert_eq!(store.get_json("missing", json!([1])), json!([1]));
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let store = store();
        store.set("blank", "").unwrap();
        assert_eq!(store.get_or("blank", "f"), "");
        // but not valid JSON
        assert_eq!(store.get_json("blank", json!("f")), json!("f"));
    }

    #[test]
    fn test_set_primitive_formatting() {
        let store = store();
        store.set("bool", true).unwrap();
        store.set("int", 42).unwrap();
        store.set("float", 1.5).unwrap();
        store.set("whole_float", 42.0).unwrap();
        assert_eq!(store.get("bool").as_deref(), Some("true"));
        assert_eq!(store.get("int").as_deref(), Some("42"));
        assert_eq!(store.get("float").as_deref(), Some("1.5"));
        assert_eq!(store.get("whole_float").as_deref(), Some("42"));
    }

    #[test]
    fn test_set_large_float_has_no_exponent() {
        let store = store();
        store.set("big", 1e21f64).unwrap();
        assert_eq!(store.get("big").as_deref(), Some("1000000000000000000000"));
    }

    #[test]
    fn test_set_twice_is_idempotent() {
        let store = store();
        store.set("k", "v").unwrap();
        let keys = store.backend().keys();
        store.set("k", "v").unwrap();
        assert_eq!(store.backend().keys(), keys);
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_malformed_json_uses_fallback() {
        let store = store();
        store.set("k", "{not-json").unwrap();
        assert_eq!(store.get_json("k", json!("fallback")), json!("fallback"));
        assert_eq!(store.inspect_json::<Value>("k"), Decoded::Corrupt);
        assert_eq!(store.inspect_json::<Value>("other"), Decoded::Missing);
    }

    #[test]
    fn test_type_mismatch_uses_fallback() {
        let store = store();
        store.set("prefs", "[1,2]").unwrap();
        let fallback = Prefs {
            volume: 3,
            theme: "light".into(),
        };
        let prefs = store.get_json("prefs", fallback);
        assert_eq!(prefs.volume, 3);
    }

    #[test]
    fn test_typed_round_trip() {
        let store = store();
        let prefs = Prefs {
            volume: 7,
            theme: "dark".into(),
        };
        store.set_json("prefs", &prefs).unwrap();
        let loaded: Prefs = store.get_json_or_else("prefs", || unreachable!());
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_unserializable_stores_null() {
        let store = store();
        store.set_json("bad", &Unserializable).unwrap();
        assert_eq!(store.get("bad").as_deref(), Some("null"));
        assert_eq!(store.get_json("bad", json!("fallback")), Value::Null);
        // A typed reader sees null as corrupt and falls back
        assert_eq!(store.get_json("bad", 5u32), 5);
    }

    #[test]
    fn test_get_json_or_default() {
        let store = store();
        let list: Vec<String> = store.get_json_or_default("list");
        assert!(list.is_empty());
    }

    #[test]
    fn test_quota_failure_propagates() {
        let store = SafeStore::new(MemoryStore::with_quota(16));
        store.set("k", "small").unwrap();
        let err = store.set("k", "far too large for the quota").unwrap_err();
        assert_eq!(err.kind, FailureKind::QuotaExceeded);
        assert_eq!(store.get_or("k", "f"), "small");

        let err = store.set_json("k", &vec!["x"; 20]).unwrap_err();
        assert!(err.is_quota());
    }

    #[test]
    fn test_denied_access() {
        let store = store();
        store.set("k", "v").unwrap();
        store.backend().set_accessible(false);

        assert_eq!(store.get_or("k", "f"), "f");
        assert_eq!(store.get_json("k", 1), 1);
        assert_eq!(store.set("k", "w").unwrap_err().kind, FailureKind::AccessDenied);
        assert_eq!(store.set_json("k", &1).unwrap_err().kind, FailureKind::AccessDenied);
        assert_eq!(store.remove("k").unwrap_err().kind, FailureKind::AccessDenied);
    }

    #[test]
    fn test_shared_backend() {
        let backend = Rc::new(MemoryStore::new());
        let a = SafeStore::new(Rc::clone(&backend));
        let b = SafeStore::new(&*backend);
        a.set("shared", "yes").unwrap();
        assert_eq!(b.get("shared").as_deref(), Some("yes"));
        assert_eq!(backend.len(), 1);
    }
}
