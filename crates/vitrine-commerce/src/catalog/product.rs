//! Product records and catalog lookups.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// A product in the catalog.
///
/// Prices are minor units. `image` is the primary display asset; `gallery`
/// holds the full set for product pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category slug (e.g. "tenis", "oculos", "relogios").
    pub category: String,
    /// Price in minor units.
    pub price: Money,
    /// Short description for listings and product pages.
    pub description: String,
    /// Primary image asset.
    pub image: String,
    /// Gallery image assets.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Selectable size labels (may be empty).
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub highlight: bool,
}

/// Read-only product lookup the cart resolves ids against.
pub trait CatalogProvider {
    /// Look up a product by id.
    fn get_by_id(&self, id: &str) -> Option<&Product>;
}

impl<C: CatalogProvider + ?Sized> CatalogProvider for &C {
    fn get_by_id(&self, id: &str) -> Option<&Product> {
        (**self).get_by_id(id)
    }
}

/// A provider with no products, for stores that run without a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl CatalogProvider for EmptyCatalog {
    fn get_by_id(&self, _id: &str) -> Option<&Product> {
        None
    }
}

/// In-memory catalog over a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products in a category, in catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Case-insensitive search over name, description, and category.
    ///
    /// A blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let text = query.trim().to_lowercase();
        if text.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&text)
                    || p.description.to_lowercase().contains(&text)
                    || p.category.to_lowercase().contains(&text)
            })
            .collect()
    }

    /// Up to `limit` featured products: highlights first, padded with the
    /// rest of the catalog when there are not enough highlights.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        let mut picks: Vec<&Product> = self.products.iter().filter(|p| p.highlight).collect();
        if picks.len() >= limit {
            picks.truncate(limit);
            return picks;
        }
        let missing = limit - picks.len();
        picks.extend(self.products.iter().filter(|p| !p.highlight).take(missing));
        picks
    }

    /// Up to `limit` products related to `id`: same category first, padded
    /// with other products. Unknown ids fall back to the featured set.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        let Some(current) = self.get_by_id(id) else {
            return self.featured(limit);
        };
        let mut picks: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.category == current.category && p.id != current.id)
            .collect();
        if picks.len() >= limit {
            picks.truncate(limit);
            return picks;
        }
        let missing = limit - picks.len();
        picks.extend(
            self.products
                .iter()
                .filter(|p| p.id != current.id && p.category != current.category)
                .take(missing),
        );
        picks
    }
}

impl CatalogProvider for Catalog {
    fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }
}
