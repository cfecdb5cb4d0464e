//! Cart line items and payload normalization.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogProvider;
use crate::ids::ProductId;
use crate::money::Money;

/// A line in the cart.
///
/// Fields other than `qty` and `selected_size` are a denormalized snapshot
/// of the catalog product at add time, so the cart keeps rendering after a
/// product leaves the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product id. Stale ids are tolerated.
    pub id: ProductId,
    /// Product name at add time.
    #[serde(default)]
    pub name: String,
    /// Category slug at add time.
    #[serde(default)]
    pub category: String,
    /// Unit price in minor units, always >= 0.
    pub price: Money,
    /// Quantity, always >= 1.
    pub qty: u32,
    /// Display image, overridable per item (e.g. a variant shot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Selectable size labels.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// The size the shopper picked, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartItem {
    /// Line total (unit price x quantity).
    pub fn line_total(&self) -> Money {
        self.price.times(self.qty)
    }
}

/// Price as it arrives from the outside world: a number in either unit, or
/// a formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// A numeric amount; unit decided by `resolve_price`.
    Number(f64),
    /// A formatted string, e.g. "R$ 699,90".
    Text(String),
}

/// The lenient item shape accepted from add payloads, persisted records,
/// and cross-context adoptions.
///
/// Every field is optional; `normalize_item` reconciles it against the
/// catalog into a canonical `CartItem` or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<PriceInput>,
    pub qty: Option<f64>,
    pub image: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub selected_size: Option<String>,
}

impl ItemPayload {
    /// Payload carrying only an id; every other field comes from the catalog.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Payload accepted by `CartStore::add_item`: a bare product id resolved
/// via the catalog, or an inline payload carrying at least an id.
#[derive(Debug, Clone, PartialEq)]
pub enum AddItem {
    /// A product id; must resolve in the catalog or the add is a no-op.
    Id(ProductId),
    /// An inline payload; stale ids are tolerated.
    Item(ItemPayload),
}

impl From<&str> for AddItem {
    fn from(id: &str) -> Self {
        AddItem::Id(ProductId::new(id))
    }
}

impl From<String> for AddItem {
    fn from(id: String) -> Self {
        AddItem::Id(ProductId::new(id))
    }
}

impl From<ProductId> for AddItem {
    fn from(id: ProductId) -> Self {
        AddItem::Id(id)
    }
}

impl From<ItemPayload> for AddItem {
    fn from(payload: ItemPayload) -> Self {
        AddItem::Item(payload)
    }
}

/// Resolve a raw price into minor units, clamped at zero.
///
/// Numeric values of 1000 or more are taken to already be minor units and
/// rounded; smaller values are major units and multiplied by 100 before
/// rounding. Strings are stripped to their digits and parsed as minor
/// units. Anything else resolves to zero.
///
/// The numeric rule has no explicit unit flag: a genuine major-unit amount
/// of 1000.00 or more is indistinguishable from a minor-unit amount and is
/// read as minor units.
pub fn resolve_price(value: Option<&PriceInput>) -> Money {
    let cents = match value {
        Some(PriceInput::Number(n)) if n.is_finite() => {
            if *n >= 1000.0 {
                n.round() as i64
            } else {
                (n * 100.0).round() as i64
            }
        }
        Some(PriceInput::Text(s)) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().unwrap_or(0)
        }
        _ => 0,
    };
    Money::from_cents(cents.max(0))
}

/// Coerce a raw quantity to an integer >= 1.
fn coerce_qty(raw: Option<f64>) -> u32 {
    let n = raw.filter(|n| n.is_finite()).unwrap_or(1.0);
    n.round().max(1.0) as u32
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Normalize a raw payload against the catalog into a canonical item.
///
/// Returns `None` when the payload carries no id. When the id resolves,
/// the catalog snapshot supplies name, category, and sizes, with the
/// payload overriding price, image, and size selection. When it does not,
/// the payload's own fields stand in for the snapshot.
pub fn normalize_item<C: CatalogProvider>(payload: &ItemPayload, catalog: &C) -> Option<CartItem> {
    let id = payload.id.as_deref().filter(|id| !id.is_empty())?;
    let qty = coerce_qty(payload.qty);

    let item = match catalog.get_by_id(id) {
        Some(product) => {
            let catalog_price = PriceInput::Number(product.price.cents() as f64);
            let price = match &payload.price {
                Some(supplied) => resolve_price(Some(supplied)),
                None => resolve_price(Some(&catalog_price)),
            };
            CartItem {
                id: ProductId::new(id),
                name: product.name.clone(),
                category: product.category.clone(),
                price,
                qty,
                image: non_empty(payload.image.clone()).or_else(|| Some(product.image.clone())),
                sizes: product.sizes.clone(),
                selected_size: non_empty(payload.selected_size.clone()),
            }
        }
        None => CartItem {
            id: ProductId::new(id),
            name: payload.name.clone().unwrap_or_default(),
            category: payload.category.clone().unwrap_or_default(),
            price: resolve_price(payload.price.as_ref()),
            qty,
            image: non_empty(payload.image.clone()),
            sizes: payload.sizes.clone().unwrap_or_default(),
            selected_size: non_empty(payload.selected_size.clone()),
        },
    };
    Some(item)
}
