//! Shopping cart module.
//!
//! Contains the persistent cart store, line items and their normalization,
//! derived totals, and the change-notification types.

mod events;
mod item;
mod pricing;
mod store;

pub use events::{CartChange, Subscription, CART_CHANGE_EVENT};
pub use item::{normalize_item, resolve_price, AddItem, CartItem, ItemPayload, PriceInput};
pub use pricing::Totals;
pub use store::{Cart, CartStore, CART_STORAGE_KEY};

// Re-exported so store consumers can build cross-context signals without
// depending on the storage crate directly.
pub use vitrine_storage::StorageEvent;
