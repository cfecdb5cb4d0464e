//! The persistent cart store.

use serde::{Deserialize, Serialize};
use vitrine_storage::{KeyValueStore, StorageEvent};

use crate::cart::{
    normalize_item, AddItem, CartChange, CartItem, ItemPayload, Subscription, Totals,
};
use crate::catalog::CatalogProvider;
use crate::money::Money;

/// Storage key the persisted cart record lives under.
pub const CART_STORAGE_KEY: &str = "vitrine:cart";

/// Key written and removed at construction to probe the backend.
const STORAGE_CHECK_KEY: &str = "__vitrine_check__";

/// The persisted cart aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items, insertion order preserved for stable rendering.
    pub items: Vec<CartItem>,
    /// Unix milliseconds of the last mutation, monotonically non-decreasing.
    pub updated_at: i64,
}

impl Cart {
    /// An empty cart stamped with the current time.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            updated_at: now_millis(),
        }
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Get an item by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }
}

type Listener = Box<dyn Fn(&CartChange)>;

/// The cart store: owns the canonical in-memory cart, persists it through an
/// injected key-value backend, and notifies subscribers after every
/// successful mutation.
///
/// Every operation is synchronous and infallible from the caller's point of
/// view: storage trouble degrades the store to memory-only for the rest of
/// the session (logged, never surfaced), and invalid payloads are no-ops
/// that return the current cart unchanged. Every returned `Cart` is a deep
/// copy; mutating it cannot corrupt store state.
pub struct CartStore<S, C> {
    storage: S,
    catalog: C,
    key: String,
    storage_ok: bool,
    memory: Cart,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl<S: KeyValueStore, C: CatalogProvider> CartStore<S, C> {
    /// Create a store over the default cart key.
    ///
    /// Probes the backend with a throwaway write; a failing probe starts the
    /// store in memory-only mode.
    pub fn new(storage: S, catalog: C) -> Self {
        Self::with_key(storage, catalog, CART_STORAGE_KEY)
    }

    /// Create a store persisting under a custom key.
    pub fn with_key(storage: S, catalog: C, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            catalog,
            key: key.into(),
            storage_ok: true,
            memory: Cart::empty(),
            listeners: Vec::new(),
            next_listener_id: 0,
        };
        store.probe_storage();
        store
    }

    fn probe_storage(&mut self) {
        let probe = self
            .storage
            .set(STORAGE_CHECK_KEY, "1")
            .and_then(|()| self.storage.remove(STORAGE_CHECK_KEY));
        if let Err(error) = probe {
            tracing::warn!(%error, "cart storage unavailable, keeping the cart in memory");
            self.storage_ok = false;
        }
    }

    /// Whether mutations are still reaching the persistent backend.
    pub fn is_persistent(&self) -> bool {
        self.storage_ok
    }

    /// Register a listener called synchronously after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&CartChange) + 'static) -> Subscription {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    /// The current cart, as a deep copy.
    pub fn cart(&mut self) -> Cart {
        self.load();
        self.memory.clone()
    }

    /// Sum of quantities across items.
    pub fn item_count(&mut self) -> u32 {
        self.load();
        self.memory.item_count()
    }

    /// Derived totals for the current cart.
    pub fn totals(&mut self) -> Totals {
        self.load();
        Totals::for_items(&self.memory.items)
    }

    /// Render an amount as the storefront's currency string.
    pub fn format_currency(&self, amount: Money) -> String {
        amount.display()
    }

    /// Add an item to the cart.
    ///
    /// A bare id is resolved via the catalog; an unresolvable bare id is a
    /// no-op. Inline payloads without an id are no-ops. When an item with
    /// the same id already exists, quantities accumulate and the existing
    /// snapshot (price, image, size) wins.
    pub fn add_item(&mut self, payload: impl Into<AddItem>) -> Cart {
        self.load();
        let payload = match payload.into() {
            AddItem::Id(id) => {
                if self.catalog.get_by_id(id.as_str()).is_none() {
                    return self.memory.clone();
                }
                ItemPayload::for_id(id.into_inner())
            }
            AddItem::Item(payload) => payload,
        };
        let Some(item) = normalize_item(&payload, &self.catalog) else {
            return self.memory.clone();
        };

        if let Some(existing) = self
            .memory
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
        {
            existing.qty = existing.qty.saturating_add(item.qty);
            return self.commit();
        }
        self.memory.items.push(item);
        self.commit()
    }

    /// Set an item's quantity exactly.
    ///
    /// The quantity is rounded and clamped at zero; zero or below removes
    /// the item. Unknown ids are no-ops.
    pub fn update_qty(&mut self, id: &str, quantity: f64) -> Cart {
        self.load();
        let Some(pos) = self
            .memory
            .items
            .iter()
            .position(|item| item.id.as_str() == id)
        else {
            return self.memory.clone();
        };

        let next = if quantity.is_finite() {
            quantity.round().max(0.0) as u32
        } else {
            0
        };
        if next == 0 {
            self.memory.items.remove(pos);
        } else {
            self.memory.items[pos].qty = next;
        }
        self.commit()
    }

    /// Remove an item. Absent ids are no-ops: nothing is persisted and no
    /// notification fires.
    pub fn remove_item(&mut self, id: &str) -> Cart {
        self.load();
        let before = self.memory.items.len();
        self.memory.items.retain(|item| item.id.as_str() != id);
        if self.memory.items.len() == before {
            return self.memory.clone();
        }
        self.commit()
    }

    /// Reset to an empty cart, persist, and notify.
    pub fn clear(&mut self) -> Cart {
        self.memory = Cart::empty();
        self.commit()
    }

    /// Adopt a cart written by another execution context.
    ///
    /// Foreign keys and removals are ignored. A parseable value replaces the
    /// local cart wholesale (last write wins, no merge) and fires the local
    /// change notification. A malformed value is logged and leaves local
    /// state untouched. Adoption never writes back to storage.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) {
        if event.key != self.key {
            return;
        }
        let Some(raw) = event.new_value.as_deref() else {
            return;
        };
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => {
                self.memory = self.normalize_cart(&value);
                self.notify();
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring malformed cross-context cart payload");
            }
        }
    }

    /// Reload the in-memory cart from the backend.
    ///
    /// A missing key seeds the backend with the current (empty) record. Raw
    /// storage failures and unparseable JSON switch the store to memory-only
    /// for the rest of the session. JSON of the wrong shape normalizes to
    /// whatever survives (bad entries filtered) without disabling storage.
    fn load(&mut self) {
        if !self.storage_ok {
            return;
        }
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(%error, "failed to read the persisted cart, keeping the cart in memory");
                self.storage_ok = false;
                return;
            }
        };
        let Some(raw) = raw else {
            self.persist();
            return;
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => self.memory = self.normalize_cart(&value),
            Err(error) => {
                tracing::warn!(%error, "persisted cart is not valid JSON, keeping the cart in memory");
                self.storage_ok = false;
            }
        }
    }

    /// Normalize a raw persisted value into a cart, filtering out entries
    /// that do not survive item normalization.
    fn normalize_cart(&self, value: &serde_json::Value) -> Cart {
        let Some(object) = value.as_object() else {
            return Cart::empty();
        };
        let items = object
            .get("items")
            .and_then(serde_json::Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        serde_json::from_value::<ItemPayload>(entry.clone()).ok()
                    })
                    .filter_map(|payload| normalize_item(&payload, &self.catalog))
                    .collect()
            })
            .unwrap_or_default();
        let updated_at = object
            .get("updatedAt")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or_else(now_millis);
        Cart { items, updated_at }
    }

    fn commit(&mut self) -> Cart {
        self.memory.updated_at = now_millis().max(self.memory.updated_at);
        self.persist();
        tracing::debug!(
            items = self.memory.items.len(),
            count = self.memory.item_count(),
            "cart updated"
        );
        self.notify();
        self.memory.clone()
    }

    fn persist(&mut self) {
        if !self.storage_ok {
            return;
        }
        let record = match serde_json::to_string(&self.memory) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize the cart record");
                return;
            }
        };
        if let Err(error) = self.storage.set(&self.key, &record) {
            tracing::warn!(%error, "failed to persist the cart, switching to memory-only");
            self.storage_ok = false;
        }
    }

    fn notify(&self) {
        let change = CartChange {
            cart: self.memory.clone(),
            totals: Totals::for_items(&self.memory.items),
        };
        for (_, listener) in &self.listeners {
            listener(&change);
        }
    }
}

/// Current Unix timestamp in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use vitrine_storage::{MemoryStore, StorageError};

    use super::*;
    use crate::catalog::fixtures::demo_catalog;
    use crate::catalog::{Catalog, EmptyCatalog};
    use crate::cart::PriceInput;

    /// Backend that fails every operation.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("down".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("down".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("down".to_string()))
        }
    }

    fn store() -> CartStore<MemoryStore, Catalog> {
        CartStore::new(MemoryStore::new(), demo_catalog())
    }

    #[test]
    fn test_first_read_seeds_empty_record() {
        let mut store = store();
        let cart = store.cart();
        assert!(cart.is_empty());
        assert!(store.is_persistent());
    }

    #[test]
    fn test_add_by_id_snapshots_catalog() {
        let mut store = store();
        let cart = store.add_item("tenis-city-runner");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].name, "Tênis City Runner");
        assert_eq!(cart.items[0].price, Money::from_cents(69_990));
        assert_eq!(cart.items[0].qty, 1);
    }

    #[test]
    fn test_add_unknown_id_is_noop() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let cart = store.add_item("nope");
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_add_same_id_accumulates_qty() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        store.add_item(ItemPayload {
            id: Some("tenis-city-runner".to_string()),
            qty: Some(2.0),
            ..ItemPayload::default()
        });
        let cart = store.cart();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].qty, 3);
    }

    #[test]
    fn test_add_keeps_existing_snapshot_fields() {
        let mut store = store();
        store.add_item(ItemPayload {
            id: Some("tenis-city-runner".to_string()),
            selected_size: Some("40".to_string()),
            ..ItemPayload::default()
        });
        store.add_item(ItemPayload {
            id: Some("tenis-city-runner".to_string()),
            selected_size: Some("42".to_string()),
            ..ItemPayload::default()
        });
        let cart = store.cart();
        // First write wins for the size; qty still accumulated.
        assert_eq!(cart.items[0].selected_size.as_deref(), Some("40"));
        assert_eq!(cart.items[0].qty, 2);
    }

    #[test]
    fn test_update_qty_rounds_half_up() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let cart = store.update_qty("tenis-city-runner", 2.6);
        assert_eq!(cart.items[0].qty, 3);
    }

    #[test]
    fn test_update_qty_zero_or_negative_removes() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let cart = store.update_qty("tenis-city-runner", 0.0);
        assert!(cart.is_empty());

        store.add_item("tenis-city-runner");
        let cart = store.update_qty("tenis-city-runner", -5.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_qty_unknown_id_is_noop() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| seen.set(seen.get() + 1));
        let cart = store.update_qty("nope", 3.0);
        assert_eq!(cart.items[0].qty, 1);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_remove_absent_id_fires_no_notification() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| seen.set(seen.get() + 1));
        store.remove_item("nope");
        assert_eq!(notified.get(), 0);
        store.remove_item("tenis-city-runner");
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_clear_resets_and_notifies_once() {
        let mut store = store();
        store.add_item(ItemPayload {
            id: Some("tenis-city-runner".to_string()),
            qty: Some(2.0),
            ..ItemPayload::default()
        });
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        let cart = store.clear();
        assert!(cart.is_empty());
        assert_eq!(notified.get(), 1);
        // The persisted record was reset too.
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_notification_carries_cart_and_totals() {
        let mut store = store();
        let changes: Rc<RefCell<Vec<CartChange>>> = Rc::default();
        let seen = Rc::clone(&changes);
        store.subscribe(move |change| seen.borrow_mut().push(change.clone()));

        store.add_item(ItemPayload {
            id: Some("x".to_string()),
            price: Some(PriceInput::Number(19.99)),
            qty: Some(1.0),
            ..ItemPayload::default()
        });

        let changes = changes.borrow();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].cart.items[0].price, Money::from_cents(1999));
        assert_eq!(changes[0].totals.total, Money::from_cents(1999));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = store();
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        let subscription = store.subscribe(move |_| seen.set(seen.get() + 1));
        store.add_item("tenis-city-runner");
        store.unsubscribe(subscription);
        store.add_item("tenis-city-runner");
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_persisted_record_round_trips() {
        let mut backend = MemoryStore::new();
        {
            let mut store = CartStore::new(&mut backend, demo_catalog());
            store.add_item("tenis-city-runner");
        }
        // A fresh store over the same backend sees the same cart.
        let mut store = CartStore::new(backend, demo_catalog());
        let cart = store.cart();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id.as_str(), "tenis-city-runner");
        assert_eq!(cart.items[0].price, Money::from_cents(69_990));
    }

    #[test]
    fn test_unavailable_storage_degrades_to_memory() {
        let mut store = CartStore::new(BrokenStore, demo_catalog());
        assert!(!store.is_persistent());
        let cart = store.add_item("tenis-city-runner");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_quota_failure_keeps_mutation_in_memory() {
        // Quota large enough for the probe and the empty record, too small
        // for a cart with an item.
        let mut store = CartStore::new(MemoryStore::with_quota(64), demo_catalog());
        assert!(store.is_persistent());
        let cart = store.add_item("tenis-city-runner");
        assert_eq!(cart.items.len(), 1);
        assert!(!store.is_persistent());
        // The mutation survives in memory.
        assert_eq!(store.cart().items.len(), 1);
    }

    #[test]
    fn test_corrupt_json_switches_to_memory_only() {
        let mut backend = MemoryStore::new();
        backend.set(CART_STORAGE_KEY, "{not json").unwrap();
        let mut store = CartStore::new(backend, demo_catalog());
        let cart = store.cart();
        assert!(cart.is_empty());
        assert!(!store.is_persistent());
    }

    #[test]
    fn test_wrong_shape_json_normalizes_without_degrading() {
        let mut backend = MemoryStore::new();
        backend
            .set(CART_STORAGE_KEY, r#"{"items": [{"noId": true}, 42]}"#)
            .unwrap();
        let mut store = CartStore::new(backend, demo_catalog());
        let cart = store.cart();
        assert!(cart.is_empty());
        assert!(store.is_persistent());
    }

    #[test]
    fn test_storage_event_adopts_foreign_cart() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let changes: Rc<RefCell<Vec<CartChange>>> = Rc::default();
        let seen = Rc::clone(&changes);
        store.subscribe(move |change| seen.borrow_mut().push(change.clone()));

        let foreign = r#"{"items":[{"id":"relogio-pulse-fit","qty":2}],"updatedAt":1}"#;
        store.handle_storage_event(&StorageEvent::changed(CART_STORAGE_KEY, foreign));

        // The notification carries the adopted cart, replaced wholesale.
        let changes = changes.borrow();
        assert_eq!(changes.len(), 1);
        let cart = &changes[0].cart;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id.as_str(), "relogio-pulse-fit");
        assert_eq!(cart.items[0].qty, 2);
        // Catalog snapshot fills in the fields the foreign record lacked.
        assert_eq!(cart.items[0].price, Money::from_cents(48_990));
        assert_eq!(changes[0].totals.total, Money::from_cents(2 * 48_990));
    }

    #[test]
    fn test_storage_event_ignores_other_keys_and_removals() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.handle_storage_event(&StorageEvent::changed("other:key", "{}"));
        store.handle_storage_event(&StorageEvent::removed(CART_STORAGE_KEY));
        assert_eq!(notified.get(), 0);
        assert_eq!(store.cart().items.len(), 1);
    }

    #[test]
    fn test_storage_event_malformed_payload_leaves_state_untouched() {
        let mut store = store();
        store.add_item("tenis-city-runner");
        let notified = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.handle_storage_event(&StorageEvent::changed(CART_STORAGE_KEY, "{broken"));
        assert_eq!(notified.get(), 0);
        assert_eq!(store.cart().items.len(), 1);
    }

    #[test]
    fn test_updated_at_is_monotonic() {
        let mut store = store();
        let first = store.add_item("tenis-city-runner").updated_at;
        let second = store.add_item("tenis-city-runner").updated_at;
        assert!(second >= first);
    }

    #[test]
    fn test_empty_catalog_store_accepts_inline_payloads() {
        let mut store = CartStore::new(MemoryStore::new(), EmptyCatalog);
        let cart = store.add_item(ItemPayload {
            id: Some("x".to_string()),
            price: Some(PriceInput::Number(19.99)),
            qty: Some(1.0),
            ..ItemPayload::default()
        });
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].price, Money::from_cents(1999));
        assert_eq!(store.totals().subtotal, Money::from_cents(1999));
    }
}
