//! Key-value backend trait and the cross-context change signal.

use serde::{Deserialize, Serialize};

use crate::StorageError;

/// A string-valued key-value backend shared by every execution context of the
/// storefront.
///
/// Values are opaque strings; the cart store serializes its record to JSON
/// before writing, exactly like the browser storage the storefront targets.
/// Implementations are expected to be cheap to call: every cart read goes
/// through `get` and every mutation through `set`.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// A storage-change notification from another execution context sharing the
/// same backend (e.g. another open tab writing the cart key).
///
/// Platform adapters translate the native storage-change signal into this
/// type and feed it to the cart store, which applies its own reconciliation
/// policy. `new_value` is `None` when the key was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// The raw new value, or `None` if the key was removed.
    pub new_value: Option<String>,
}

impl StorageEvent {
    /// Convenience constructor for a changed key.
    pub fn changed(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            new_value: Some(new_value.into()),
        }
    }

    /// Convenience constructor for a removed key.
    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            new_value: None,
        }
    }
}
