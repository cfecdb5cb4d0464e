//! In-memory key-value backend.

use std::collections::HashMap;

use crate::{KeyValueStore, StorageError};

/// HashMap-backed `KeyValueStore`.
///
/// This is the backend tests and demos inject in place of real platform
/// storage. An optional byte quota covers the values of all keys, so the
/// quota-exceeded degradation path can be driven deterministically.
///
/// # Example
///
/// ```rust
/// use vitrine_storage::{KeyValueStore, MemoryStore, StorageError};
///
/// let mut store = MemoryStore::with_quota(8);
/// assert!(store.set("k", "12345678").is_ok());
/// assert!(matches!(
///     store.set("k", "123456789"),
///     Err(StorageError::QuotaExceeded(_))
/// ));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose values may occupy at most `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes the stored values would occupy after replacing `key` with
    /// `value`.
    fn projected_usage(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        others + value.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if self.projected_usage(key, value) > quota {
                return Err(StorageError::QuotaExceeded(key.to_string()));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
