//! Product catalog module.
//!
//! Read-only product lookup. The cart core consumes the catalog only
//! through `CatalogProvider::get_by_id`; the richer lookups exist for page
//! controllers (listings, search, related products).

mod product;

pub mod fixtures;

pub use product::{Catalog, CatalogProvider, EmptyCatalog, Product};
