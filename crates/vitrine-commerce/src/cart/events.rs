//! Cart change notification types.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, Totals};

/// Name of the single cart-change event.
///
/// Platform adapters that re-broadcast store notifications onto a DOM-style
/// event bus use this as the event name.
pub const CART_CHANGE_EVENT: &str = "vitrine:cart-change";

/// Payload delivered to subscribers after every successful mutation,
/// including cross-context adoptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartChange {
    /// The cart after the mutation.
    pub cart: Cart,
    /// Totals derived from that cart.
    pub totals: Totals,
}

/// Handle returned by `CartStore::subscribe`; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);
