//! Storage medium failures
//!
//! Only the medium itself can fail a call. Missing keys, corrupt JSON and
//! unserializable values are all resolved inside `SafeStore` and never show
//! up here.

use std::fmt;

use thiserror::Error;

/// Result type alias for writes to the storage medium.
pub type Result<T> = std::result::Result<T, StorageUnavailable>;

/// Why the medium refused an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No storage object exists (no window, storage API missing)
    NoStorage,
    /// Host disabled access (privacy mode, blocked third-party storage)
    AccessDenied,
    /// Write would exceed the origin's storage quota
    QuotaExceeded,
    /// Anything the backend could not classify
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NoStorage => "no storage",
            FailureKind::AccessDenied => "access denied",
            FailureKind::QuotaExceeded => "quota exceeded",
            FailureKind::Other => "rejected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storage medium refused a write or remove.
///
/// Durability can no longer be assumed for `key`. Whether to retry, degrade
/// to in-memory state, or surface the problem is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage unavailable for key `{key}`: {kind}: {detail}")]
pub struct StorageUnavailable {
    /// Key the failed operation targeted (empty when opening the store)
    pub key: String,
    /// Failure classification
    pub kind: FailureKind,
    /// Backend-provided detail
    pub detail: String,
}

impl StorageUnavailable {
    pub fn new(key: impl Into<String>, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            detail: detail.into(),
        }
    }

    /// Failure that happened before any key was involved
    pub fn opening(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::new(String::new(), kind, detail)
    }

    pub fn is_quota(&self) -> bool {
        self.kind == FailureKind::QuotaExceeded
    }
}
