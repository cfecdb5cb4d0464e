//! Storefront domain for vitrine.
//!
//! This crate provides the core of a client-side storefront:
//!
//! - **Money**: minor-currency-unit amounts with deterministic BRL rendering
//! - **Catalog**: read-only product lookup the cart resolves ids against
//! - **Cart**: a persistent cart store with normalization, totals, change
//!   notification, and cross-context adoption
//! - **Checkout**: payment-form validation and the payment simulation that
//!   drives order completion
//!
//! # Example
//!
//! ```rust
//! use vitrine_commerce::prelude::*;
//! use vitrine_storage::MemoryStore;
//!
//! let catalog = vitrine_commerce::catalog::fixtures::demo_catalog();
//! let mut store = CartStore::new(MemoryStore::new(), catalog);
//!
//! let cart = store.add_item("tenis-city-runner");
//! assert_eq!(cart.items.len(), 1);
//!
//! let totals = store.totals();
//! println!("Total: {}", store.format_currency(totals.total));
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod ids;
pub mod money;

pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ids::{OrderId, ProductId};
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, CatalogProvider, EmptyCatalog, Product};

    // Cart
    pub use crate::cart::{
        AddItem, Cart, CartChange, CartItem, CartStore, ItemPayload, PriceInput, StorageEvent,
        Subscription, Totals, CART_CHANGE_EVENT, CART_STORAGE_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        validate_form, Clipboard, ClipboardError, FieldError, OrderConfirmation, PaymentError,
        PaymentField, PaymentForm, PaymentMethod, PaymentSimulator, PaymentState,
        ValidationReport,
    };
}
