//! JSON encoding for stored values
//!
//! Encoding always yields parseable JSON. Decoding never fails outward; it
//! reports what it found as a `Decoded` marker.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::consts::NULL_SENTINEL;

/// Outcome of reading a JSON entry
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// Entry parsed into the requested type
    Value(T),
    /// No entry under the key
    Missing,
    /// Entry exists but is not valid JSON for the requested type
    Corrupt,
}

impl<T> Decoded<T> {
    /// The decoded value, or `fallback` for both `Missing` and `Corrupt`
    pub fn or(self, fallback: T) -> T {
        match self {
            Decoded::Value(value) => value,
            Decoded::Missing | Decoded::Corrupt => fallback,
        }
    }

    pub fn or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Decoded::Value(value) => value,
            Decoded::Missing | Decoded::Corrupt => fallback(),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Decoded::Value(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Decoded::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Serialize `value` to JSON text, or `"null"` if it cannot be serialized
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Value not serializable, storing null instead: {}", e);
            NULL_SENTINEL.to_string()
        }
    }
}

/// Parse raw stored text (if any) as `T`
pub fn decode_json<T: DeserializeOwned>(raw: Option<&str>) -> Decoded<T> {
    let Some(raw) = raw else {
        return Decoded::Missing;
    };
    match serde_json::from_str(raw) {
        Ok(value) => Decoded::Value(value),
        Err(e) => {
            log::debug!("Stored text is not valid JSON for this type: {}", e);
            Decoded::Corrupt
        }
    }
}
