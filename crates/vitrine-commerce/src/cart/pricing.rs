//! Derived cart totals.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::money::Money;

/// Derived totals for a cart. Never persisted; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Reserved for a discount engine; always zero today.
    pub discount: Money,
    /// `max(0, subtotal - discount)`.
    pub total: Money,
}

impl Totals {
    /// Compute totals over a set of items.
    pub fn for_items(items: &[CartItem]) -> Self {
        let subtotal: Money = items.iter().map(CartItem::line_total).sum();
        let discount = Money::ZERO;
        let total = subtotal.minus_clamped(discount);
        Self {
            subtotal,
            discount,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn item(id: &str, price_cents: i64, qty: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: String::new(),
            category: String::new(),
            price: Money::from_cents(price_cents),
            qty,
            image: None,
            sizes: vec![],
            selected_size: None,
        }
    }

    #[test]
    fn test_totals_sum_line_totals() {
        let totals = Totals::for_items(&[item("a", 1000, 2), item("b", 2000, 1)]);
        assert_eq!(totals.subtotal, Money::from_cents(4000));
        assert_eq!(totals.discount, Money::ZERO);
        assert_eq!(totals.total, Money::from_cents(4000));
    }

    #[test]
    fn test_totals_of_empty_cart() {
        let totals = Totals::for_items(&[]);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.total, Money::ZERO);
    }
}
