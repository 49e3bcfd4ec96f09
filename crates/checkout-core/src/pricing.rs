//! # Pricing Rules
//!
//! Promotions applied on top of the scanned-item subtotal.
//!
//! ## Rule Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply(&[&Product]) -> Money                                            │
//! │                                                                         │
//! │  • pure: same items in, same adjustment out                             │
//! │  • counts only: scan order never changes the result                     │
//! │  • sign: negative = discount, zero = no effect, never positive          │
//! │  • empty or unrelated items → Money::zero()                             │
//! │  • independent: a rule never sees another rule's output                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opening Day Promotions
//! | Rule                | SKU        | Adjustment                                      |
//! |---------------------|------------|-------------------------------------------------|
//! | [`BundleRule`]      | `atv`      | −(⌊count / 3⌋ × unit price)                     |
//! | [`BulkDiscountRule`]| `ipd`      | −(count × $50.00) when count > 4                |
//! | [`FreeAccessoryRule`]| `mbp`→`vga`| −(scanned `vga` count × $30.00) when any `mbp` |
//!
//! New promotions are new [`PricingRule`] implementations added to a
//! [`PricingRules`] set; [`Checkout`](crate::checkout::Checkout) never changes.

use std::fmt;

use tracing::debug;

use crate::money::Money;
use crate::types::{AppliedAdjustment, Product};

/// Per-unit iPad discount once the bulk threshold is passed: $549.99 → $499.99.
pub const IPAD_BULK_DISCOUNT: Money = Money::from_cents(54999 - 49999);

/// Amount waived per VGA adapter bought alongside a MacBook Pro.
pub const VGA_ADAPTER_WAIVER: Money = Money::from_cents(3000);

/// Counts scanned items carrying `sku`.
pub fn count_of(items: &[&Product], sku: &str) -> i64 {
    items.iter().filter(|p| p.is(sku)).count() as i64
}

// =============================================================================
// Rule Trait
// =============================================================================

/// A promotion evaluated against the full list of scanned items.
pub trait PricingRule: fmt::Debug + Send + Sync {
    /// Short label printed next to the adjustment on a receipt.
    fn name(&self) -> &str;

    /// Returns the adjustment for `items`: negative or zero.
    fn apply(&self, items: &[&Product]) -> Money;
}

// =============================================================================
// Bundle: buy N, pay for N - 1
// =============================================================================

/// Every complete bundle of `bundle_size` items of `sku` gets one free.
///
/// ## Example
/// ```rust
/// use checkout_core::pricing::{BundleRule, PricingRule};
/// use checkout_core::{Money, Product};
///
/// let atv = Product::new("atv", "Apple TV", Money::from_cents(10950));
/// let rule = BundleRule::three_for_two("atv");
///
/// assert_eq!(rule.apply(&[&atv, &atv]).cents(), 0);
/// assert_eq!(rule.apply(&[&atv, &atv, &atv]).cents(), -10950);
/// ```
#[derive(Debug, Clone)]
pub struct BundleRule {
    name: String,
    sku: String,
    bundle_size: i64,
}

impl BundleRule {
    pub fn new(sku: impl Into<String>, bundle_size: i64) -> Self {
        let sku = sku.into();
        BundleRule {
            name: format!("{} for {} on {}", bundle_size, bundle_size - 1, sku),
            sku,
            bundle_size,
        }
    }

    /// "Buy 3, pay for 2".
    pub fn three_for_two(sku: impl Into<String>) -> Self {
        BundleRule::new(sku, 3)
    }
}

impl PricingRule for BundleRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[&Product]) -> Money {
        let free = count_of(items, &self.sku)
            .checked_div(self.bundle_size)
            .unwrap_or(0);
        if free <= 0 {
            return Money::zero();
        }

        // The free unit is priced as scanned, so a catalog price change follows through.
        let unit_price = items
            .iter()
            .find(|p| p.is(&self.sku))
            .map(|p| p.price)
            .unwrap_or_default();

        -(unit_price * free)
    }
}

// =============================================================================
// Bulk threshold
// =============================================================================

/// Buying more than `threshold` units of `sku` discounts every unit by a fixed amount.
///
/// The per-unit discount is a constant of the promotion, not derived from
/// the catalog price.
#[derive(Debug, Clone)]
pub struct BulkDiscountRule {
    name: String,
    sku: String,
    threshold: i64,
    discount_per_unit: Money,
}

impl BulkDiscountRule {
    pub fn new(sku: impl Into<String>, threshold: i64, discount_per_unit: Money) -> Self {
        let sku = sku.into();
        BulkDiscountRule {
            name: format!("bulk {} over {}", sku, threshold),
            sku,
            threshold,
            discount_per_unit,
        }
    }
}

impl PricingRule for BulkDiscountRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[&Product]) -> Money {
        let count = count_of(items, &self.sku);
        if count > self.threshold {
            -(self.discount_per_unit * count)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Free accessory
// =============================================================================

/// Waives `free_sku` items that were actually scanned, provided at least
/// one `trigger_sku` item was scanned too.
///
/// No trigger item means no waiver, and a trigger item without a scanned
/// accessory means no refund: `[mbp, ipd]` pays full price for both.
///
/// ## Example
/// ```rust
/// use checkout_core::pricing::{FreeAccessoryRule, PricingRule, VGA_ADAPTER_WAIVER};
/// use checkout_core::{Money, Product};
///
/// let mbp = Product::new("mbp", "MacBook Pro", Money::from_cents(139999));
/// let vga = Product::new("vga", "VGA adapter", Money::from_cents(3000));
/// let rule = FreeAccessoryRule::new("mbp", "vga", VGA_ADAPTER_WAIVER);
///
/// assert_eq!(rule.apply(&[&mbp, &vga]).cents(), -3000);
/// assert_eq!(rule.apply(&[&mbp]).cents(), 0);
/// assert_eq!(rule.apply(&[&vga]).cents(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct FreeAccessoryRule {
    name: String,
    trigger_sku: String,
    free_sku: String,
    waived_per_unit: Money,
}

impl FreeAccessoryRule {
    pub fn new(
        trigger_sku: impl Into<String>,
        free_sku: impl Into<String>,
        waived_per_unit: Money,
    ) -> Self {
        let trigger_sku = trigger_sku.into();
        let free_sku = free_sku.into();
        FreeAccessoryRule {
            name: format!("free {} with {}", free_sku, trigger_sku),
            trigger_sku,
            free_sku,
            waived_per_unit,
        }
    }
}

impl PricingRule for FreeAccessoryRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[&Product]) -> Money {
        if count_of(items, &self.trigger_sku) == 0 {
            return Money::zero();
        }

        -(self.waived_per_unit * count_of(items, &self.free_sku))
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// Ordered set of pricing rules. Rules are evaluated in insertion order.
#[derive(Debug, Default)]
pub struct PricingRules {
    rules: Vec<Box<dyn PricingRule>>,
}

impl PricingRules {
    /// Creates an empty rule set (every checkout pays the plain subtotal).
    pub fn new() -> Self {
        PricingRules { rules: Vec::new() }
    }

    /// Opening day promotions: 3-for-2 Apple TV, bulk Super iPad, free VGA
    /// adapter with a MacBook Pro.
    pub fn opening_day() -> Self {
        PricingRules::new()
            .with(BundleRule::three_for_two("atv"))
            .with(BulkDiscountRule::new("ipd", 4, IPAD_BULK_DISCOUNT))
            .with(FreeAccessoryRule::new("mbp", "vga", VGA_ADAPTER_WAIVER))
    }

    /// Appends a rule, builder style.
    pub fn with(mut self, rule: impl PricingRule + 'static) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: impl PricingRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PricingRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Applies every rule to `items`, one adjustment per rule in order.
    pub fn evaluate(&self, items: &[&Product]) -> Vec<AppliedAdjustment> {
        self.iter()
            .map(|rule| {
                let amount = rule.apply(items);
                debug!(rule = rule.name(), adjustment = %amount, "Pricing rule applied");
                AppliedAdjustment {
                    rule: rule.name().to_string(),
                    amount_cents: amount.cents(),
                }
            })
            .collect()
    }

    /// Sum of every rule's adjustment.
    pub fn discount(&self, items: &[&Product]) -> Money {
        self.iter().map(|rule| rule.apply(items)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
