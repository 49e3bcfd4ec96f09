//! # Domain Types
//!
//! Product and totals types shared by the catalog, the pricing rules and
//! the checkout session.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────────┐ │
//! │  │    Product      │   │  CheckoutTotals  │   │  AppliedAdjustment   │ │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────────  │ │
//! │  │  sku (key)      │   │  item_count      │   │  rule                │ │
//! │  │  name           │   │  subtotal_cents  │   │  amount_cents (≤ 0)  │ │
//! │  │  price (Money)  │   │  discount_cents  │   └──────────────────────┘ │
//! │  └─────────────────┘   │  total_cents     │                            │
//! │                        │  adjustments     │                            │
//! │                        └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Immutable once registered in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stock Keeping Unit - the catalog key scanned at the till.
    pub sku: String,

    /// Display name shown on the receipt.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Money, Product};
    ///
    /// let tv = Product::new("atv", "Apple TV", Money::from_cents(10950));
    /// assert_eq!(tv.price.to_string(), "$109.50");
    /// ```
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            sku: sku.into(),
            name: name.into(),
            price,
        }
    }

    /// Checks whether this product carries the given SKU.
    #[inline]
    pub fn is(&self, sku: &str) -> bool {
        self.sku == sku
    }
}

// =============================================================================
// Totals
// =============================================================================

/// One pricing rule's contribution to a checkout total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAdjustment {
    /// Name of the rule that produced the adjustment.
    pub rule: String,

    /// Adjustment in cents, zero or negative.
    pub amount_cents: i64,
}

impl AppliedAdjustment {
    /// Returns the adjustment as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Checkout totals summary for receipts and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    /// Number of scanned items, duplicates counted individually.
    pub item_count: usize,
    pub subtotal_cents: i64,
    /// Sum of every adjustment, zero or negative.
    pub discount_cents: i64,
    pub total_cents: i64,
    /// Per-rule adjustments in evaluation order.
    pub adjustments: Vec<AppliedAdjustment>,
}

impl CheckoutTotals {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
