//! Persistent key-value port for the vitrine storefront.
//!
//! The storefront core persists a single JSON record under a fixed key and
//! must keep working when the backend is missing, full, or broken. This crate
//! provides:
//!
//! - `KeyValueStore` - the injectable backend trait
//! - `MemoryStore` - a HashMap-backed implementation with an optional quota
//! - `StorageEvent` - the cross-context storage-change signal
//!
//! # Example
//!
//! ```rust
//! use vitrine_storage::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("vitrine:cart", r#"{"items":[]}"#).unwrap();
//! assert!(store.get("vitrine:cart").unwrap().is_some());
//! ```

mod error;
mod kv;
mod memory;

pub use error::StorageError;
pub use kv::{KeyValueStore, StorageEvent};
pub use memory::MemoryStore;
