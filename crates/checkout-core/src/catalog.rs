//! # Catalog
//!
//! SKU → [`Product`] lookup used by every checkout.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Build (mutable)                 Checkout (read-only)                   │
//! │  ───────────────                 ────────────────────                   │
//! │  Catalog::new()                                                         │
//! │  register(product) ──┐                                                  │
//! │  register(product) ──┼──► &Catalog ──► Checkout::scan ──► resolve(sku) │
//! │  from_json(..)     ──┘        │                                         │
//! │                               └──► Checkout::scan (another session)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once built, a catalog is only ever borrowed immutably, so any number of
//! sessions (on any number of threads) can read it without locking.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_product;

/// Product catalog keyed by SKU.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

/// Catalog file row. Prices are decimal strings so `"109.50"` reads as written.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    sku: String,
    name: String,
    price: String,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: HashMap::new(),
        }
    }

    /// The four products stocked on opening day.
    ///
    /// | SKU   | Name        | Price   |
    /// |-------|-------------|---------|
    /// | `ipd` | Super iPad  | 549.99  |
    /// | `mbp` | MacBook Pro | 1399.99 |
    /// | `atv` | Apple TV    | 109.50  |
    /// | `vga` | VGA adapter | 30.00   |
    pub fn opening_day() -> Self {
        let mut catalog = Catalog::new();
        for product in [
            Product::new("ipd", "Super iPad", Money::from_cents(54999)),
            Product::new("mbp", "MacBook Pro", Money::from_cents(139999)),
            Product::new("atv", "Apple TV", Money::from_cents(10950)),
            Product::new("vga", "VGA adapter", Money::from_cents(3000)),
        ] {
            catalog
                .register(product)
                .expect("opening-day products pass validation");
        }
        catalog
    }

    /// Loads a catalog from a JSON array of `{"sku", "name", "price"}` rows.
    ///
    /// Every row goes through [`Catalog::register`], so a later row with the
    /// same SKU overwrites an earlier one.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::Catalog;
    ///
    /// let catalog = Catalog::from_json(r#"[
    ///     {"sku": "atv", "name": "Apple TV", "price": "109.50"}
    /// ]"#).unwrap();
    ///
    /// assert_eq!(catalog.resolve("atv").unwrap().price.cents(), 10950);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidCatalog {
                reason: e.to_string(),
            })?;

        let mut catalog = Catalog::new();
        for entry in entries {
            let price: Money = entry.price.parse().map_err(|e| CoreError::InvalidCatalog {
                reason: format!("{}: {}", entry.sku, e),
            })?;
            catalog.register(Product::new(entry.sku, entry.name, price))?;
        }

        Ok(catalog)
    }

    /// Inserts a product, replacing any existing product with the same SKU.
    ///
    /// Rejects products that fail [`validate_product`] and leaves the
    /// catalog unchanged in that case.
    pub fn register(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;

        debug!(sku = %product.sku, price = %product.price, "Registering product");
        self.products.insert(product.sku.clone(), product);
        Ok(())
    }

    /// Looks up a product by SKU.
    pub fn resolve(&self, sku: &str) -> CoreResult<&Product> {
        self.products
            .get(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.products.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates products in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
