//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog and checkout failures                  │
//! │  ├── ValidationError  - Product fields rejected at registration        │
//! │  └── MoneyParseError  - Decimal amount strings that are not cents      │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                  │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing rules and totals never fail, so nothing here describes them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and checkout errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A scanned SKU is not in the catalog.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "xyz"
    ///      │
    ///      ▼
    /// Catalog::resolve("xyz") → ProductNotFound
    ///      │
    ///      ▼
    /// InvalidSku("xyz"), scanned items untouched
    ///      │
    ///      ▼
    /// Caller decides: abort the checkout or skip the scan
    /// ```
    #[error("Invalid SKU: {0}")]
    InvalidSku(String),

    /// Catalog lookup miss.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog source could not be read as a product list.
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Product field validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. whitespace in a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Errors from parsing a decimal string into [`Money`](crate::money::Money).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal amount")]
    Invalid(String),

    /// More than two fractional digits.
    #[error("'{0}' has more precision than one cent")]
    TooPrecise(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
