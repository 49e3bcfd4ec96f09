//! # Checkout Session
//!
//! Accumulates scanned products and prices them on demand.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Operations                               │
//! │                                                                         │
//! │  Till Action            Method              Session Change              │
//! │  ───────────            ──────              ──────────────              │
//! │                                                                         │
//! │  Scan barcode ────────► scan("atv") ──────► items.push(&Apple TV)      │
//! │                                                                         │
//! │  Unknown barcode ─────► scan("xyz") ──────► Err(InvalidSku), no change │
//! │                                                                         │
//! │  Show total ──────────► total() ──────────► (read only)                │
//! │                                                                         │
//! │  Print receipt ───────► totals() ─────────► (read only)                │
//! │                                                                         │
//! │  Scanning after a total is fine; the next total() includes it.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::{Catalog, Checkout, PricingRules};
//!
//! let catalog = Catalog::opening_day();
//! let rules = PricingRules::opening_day();
//!
//! let mut checkout = Checkout::new(&catalog, &rules);
//! for sku in ["atv", "atv", "atv", "vga"] {
//!     checkout.scan(sku).unwrap();
//! }
//!
//! assert_eq!(checkout.total().to_string(), "$249.00");
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{count_of, PricingRules};
use crate::types::{CheckoutTotals, Product};

/// One checkout transaction.
///
/// ## Invariants
/// - `items` only holds products resolved from `catalog`
/// - a failed scan leaves `items` untouched
/// - pricing is a function of the per-SKU counts in `items`, never of scan order
#[derive(Debug)]
pub struct Checkout<'a> {
    /// Correlates log events for this session.
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: &'a Catalog,
    rules: &'a PricingRules,
    items: Vec<&'a Product>,
}

impl<'a> Checkout<'a> {
    /// Starts an empty session against a catalog and a rule set.
    pub fn new(catalog: &'a Catalog, rules: &'a PricingRules) -> Self {
        Checkout {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            rules,
            items: Vec::new(),
        }
    }

    /// Scans one item by SKU.
    ///
    /// ## Errors
    /// [`CoreError::InvalidSku`] if the SKU is not in the catalog.
    pub fn scan(&mut self, sku: &str) -> CoreResult<()> {
        let catalog = self.catalog;
        let product = match catalog.resolve(sku) {
            Ok(product) => product,
            Err(_) => {
                // the caller decides whether this is worth a warning
                debug!(session = %self.id, sku = %sku, "Rejected scan of unknown SKU");
                return Err(CoreError::InvalidSku(sku.to_string()));
            }
        };

        self.items.push(product);
        debug!(
            session = %self.id,
            sku = %sku,
            item_count = self.items.len(),
            "Scanned item"
        );
        Ok(())
    }

    /// Sum of unit prices of every scanned item, duplicates counted individually.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|p| p.price).sum()
    }

    /// Sum of every pricing rule's adjustment: zero or negative.
    pub fn discount(&self) -> Money {
        self.rules.discount(&self.items)
    }

    /// Amount due: subtotal plus every rule's adjustment.
    ///
    /// Amounts are whole cents throughout, so the result is already exact
    /// to two decimal places. An empty session totals `$0.00`.
    pub fn total(&self) -> Money {
        self.subtotal() + self.discount()
    }

    /// Totals with the per-rule breakdown, for receipts.
    pub fn totals(&self) -> CheckoutTotals {
        let adjustments = self.rules.evaluate(&self.items);
        let subtotal = self.subtotal();
        let discount: Money = adjustments.iter().map(|a| a.amount()).sum();
        let total = subtotal + discount;

        debug!(
            session = %self.id,
            subtotal = %subtotal,
            discount = %discount,
            total = %total,
            "Checkout totals computed"
        );

        CheckoutTotals {
            item_count: self.items.len(),
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            adjustments,
        }
    }

    /// Scanned items in scan order.
    pub fn items(&self) -> &[&'a Product] {
        &self.items
    }

    /// Number of scanned items carrying `sku`.
    pub fn count_of(&self, sku: &str) -> i64 {
        count_of(&self.items, sku)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(skus: &[&str]) -> Money {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);
        for sku in skus {
            checkout.scan(sku).unwrap();
        }
        checkout.total()
    }

    #[test]
    fn test_empty_checkout_totals_zero() {
        let total = run(&[]);
        assert!(total.is_zero());
        assert_eq!(total.to_string(), "$0.00");
    }

    #[test]
    fn test_three_apple_tvs_and_adapter() {
        assert_eq!(run(&["atv", "atv", "atv", "vga"]).cents(), 24900);
    }

    #[test]
    fn test_bulk_ipads_with_apple_tvs() {
        let total = run(&["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"]);
        assert_eq!(total.cents(), 271895);
        assert_eq!(total.to_string(), "$2718.95");
    }

    #[test]
    fn test_macbook_adapter_and_ipad() {
        assert_eq!(run(&["mbp", "vga", "ipd"]).cents(), 194998);
    }

    /// A MacBook Pro without a scanned VGA adapter earns no refund.
    #[test]
    fn test_macbook_without_adapter_pays_full_price() {
        assert_eq!(run(&["mbp", "ipd"]).cents(), 139999 + 54999);
        assert_eq!(run(&["mbp", "ipd"]).cents(), 194998);
    }

    #[test]
    fn test_adapter_without_macbook_is_charged() {
        assert_eq!(run(&["vga", "ipd"]).cents(), 3000 + 54999);
    }

    #[test]
    fn test_four_ipads_get_no_bulk_discount() {
        assert_eq!(run(&["ipd", "ipd", "ipd", "ipd"]).cents(), 4 * 54999);
    }

    #[test]
    fn test_total_ignores_scan_order() {
        let skus = ["atv", "ipd", "mbp", "ipd", "vga", "atv", "ipd", "atv", "ipd", "ipd"];
        let mut reversed = skus;
        reversed.reverse();
        let mut sorted = skus;
        sorted.sort_unstable();

        let expected = run(&skus);
        assert_eq!(run(&reversed), expected);
        assert_eq!(run(&sorted), expected);
    }

    #[test]
    fn test_invalid_sku_leaves_items_unchanged() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);

        checkout.scan("atv").unwrap();
        let err = checkout.scan("invalid_sku").unwrap_err();

        assert!(matches!(err, CoreError::InvalidSku(ref sku) if sku == "invalid_sku"));
        assert_eq!(err.to_string(), "Invalid SKU: invalid_sku");
        assert_eq!(checkout.item_count(), 1);
        assert_eq!(checkout.items()[0].sku, "atv");
        assert_eq!(checkout.total().cents(), 10950);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn scan_unknown_with_max_level(level: tracing::Level) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let catalog = Catalog::opening_day();
            let rules = PricingRules::opening_day();
            let mut checkout = Checkout::new(&catalog, &rules);
            assert!(checkout.scan("xyz").is_err());
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_rejected_scan_logs_at_debug_only() {
        let warnings = scan_unknown_with_max_level(tracing::Level::WARN);
        assert!(!warnings.contains("Rejected scan"), "{}", warnings);

        let debug = scan_unknown_with_max_level(tracing::Level::DEBUG);
        assert!(debug.contains("Rejected scan of unknown SKU"), "{}", debug);
        assert!(debug.contains("xyz"));
    }

    #[test]
    fn test_total_is_idempotent_and_scanning_continues() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);

        checkout.scan("atv").unwrap();
        checkout.scan("atv").unwrap();
        let first = checkout.total();
        assert_eq!(checkout.total(), first);
        assert_eq!(first.cents(), 21900);

        // third Apple TV completes the bundle
        checkout.scan("atv").unwrap();
        assert_eq!(checkout.total().cents(), 21900);
        assert_eq!(checkout.count_of("atv"), 3);
    }

    #[test]
    fn test_totals_breakdown() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);
        for sku in ["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"] {
            checkout.scan(sku).unwrap();
        }

        let totals = checkout.totals();
        assert_eq!(totals.item_count, 7);
        assert_eq!(totals.subtotal_cents, 2 * 10950 + 5 * 54999);
        assert_eq!(totals.discount_cents, -25000);
        assert_eq!(totals.total(), checkout.total());
        assert_eq!(totals.adjustments.len(), 3);
        assert_eq!(totals.adjustments[1].amount_cents, -25000);
    }

    #[test]
    fn test_sessions_are_independent() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut first = Checkout::new(&catalog, &rules);
        let mut second = Checkout::new(&catalog, &rules);

        first.scan("mbp").unwrap();
        second.scan("vga").unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.total().cents(), 139999);
        assert_eq!(second.total().cents(), 3000);
        assert!(second.started_at() >= first.started_at());
    }

    #[test]
    fn test_sessions_share_catalog_across_threads() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();

        let totals: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = [["atv", "atv", "atv", "vga"], ["mbp", "vga", "ipd", "ipd"]]
                .into_iter()
                .map(|skus| {
                    let (catalog, rules) = (&catalog, &rules);
                    scope.spawn(move || {
                        let mut checkout = Checkout::new(catalog, rules);
                        for sku in skus {
                            checkout.scan(sku).unwrap();
                        }
                        checkout.total().cents()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(totals, [24900, 139999 + 2 * 54999]);
    }

    #[test]
    fn test_empty_rule_set_charges_subtotal() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::new();
        let mut checkout = Checkout::new(&catalog, &rules);
        for sku in ["atv", "atv", "atv"] {
            checkout.scan(sku).unwrap();
        }

        assert!(checkout.discount().is_zero());
        assert_eq!(checkout.total(), checkout.subtotal());
        assert_eq!(checkout.total().cents(), 32850);
    }
}
