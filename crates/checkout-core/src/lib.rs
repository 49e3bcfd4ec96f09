//! # checkout-core: Pricing Logic for the Checkout Till
//!
//! Catalog lookup, promotional pricing rules and the checkout session that
//! ties them together. Everything here is a pure calculation; the only side
//! effect is `tracing` events.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-cli (driver)                        │   │
//! │  │      load config ──► build catalog ──► scan SKUs ──► print     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  pricing  │  │ checkout  │  │   money   │  │   │
//! │  │   │  Catalog  │  │ BundleRule│  │ Checkout  │  │   Money   │  │   │
//! │  │   │  Product  │  │ Bulk/Free │  │  totals   │  │  (cents)  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER MONEY                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Product and totals types
//! - [`catalog`] - SKU → Product lookup
//! - [`pricing`] - Pricing rule trait, promotions and rule sets
//! - [`checkout`] - The checkout session
//! - [`validation`] - Product field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Catalog, Checkout, CoreError, PricingRules};
//!
//! // Built once, shared by every session
//! let catalog = Catalog::opening_day();
//! let rules = PricingRules::opening_day();
//!
//! let mut checkout = Checkout::new(&catalog, &rules);
//! for sku in ["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"] {
//!     checkout.scan(sku)?;
//! }
//!
//! // 2 × $109.50 + 5 × $549.99 - 5 × $50.00
//! assert_eq!(checkout.total().to_string(), "$2718.95");
//!
//! assert!(matches!(checkout.scan("xyz"), Err(CoreError::InvalidSku(_))));
//! # Ok::<(), CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use checkout::Checkout;
pub use error::{CoreError, CoreResult, MoneyParseError, ValidationError};
pub use money::Money;
pub use pricing::{PricingRule, PricingRules};
pub use types::*;
