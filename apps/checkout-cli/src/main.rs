//! # Checkout CLI
//!
//! Thin driver around `checkout-core`: builds a catalog, scans the SKUs
//! given on the command line and prints the totals.
//!
//! ## Usage
//! ```bash
//! # Opening-day catalog and promotions
//! cargo run -p checkout-cli -- atv atv atv vga
//!
//! # Custom catalog, JSON output, debug logs on stderr
//! CHECKOUT_LOG=checkout_core=debug \
//!     cargo run -p checkout-cli -- --catalog ./catalog.json --json mbp vga ipd
//! ```
//!
//! ## Flow
//! ```text
//! env ──► CliConfig ──┐
//!                     ├──► Catalog ──► Checkout::scan × N ──► totals ──► stdout
//! argv ──► Args ──────┘
//! ```

mod args;
mod config;

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use checkout_core::{Catalog, Checkout, CheckoutTotals, CoreError, PricingRules};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, USAGE};
use crate::config::{CliConfig, ConfigError};

fn main() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;
    let Some(config) = startup_config(&args, CliConfig::load)? else {
        println!("{}", USAGE);
        return Ok(());
    };
    init_tracing(&config.log_filter);

    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::opening_day(),
    };
    info!(products = catalog.len(), "Catalog loaded");

    let rules = PricingRules::opening_day();
    let mut checkout = Checkout::new(&catalog, &rules);
    scan_all(&mut checkout, &args.skus, config.skip_invalid)?;

    let totals = checkout.totals();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        print!("{}", render_receipt(&totals));
    }

    Ok(())
}

/// Loads the environment configuration and applies the flags on top.
///
/// `None` means `--help` was asked for; the environment is not read at all
/// then, so a bad variable cannot hide the usage text.
fn startup_config<F>(args: &Args, load: F) -> Result<Option<CliConfig>, ConfigError>
where
    F: FnOnce() -> Result<CliConfig, ConfigError>,
{
    if args.help {
        return Ok(None);
    }

    let mut config = load()?;
    apply_args(&mut config, args);
    Ok(Some(config))
}

/// Command-line flags take precedence over the environment.
fn apply_args(config: &mut CliConfig, args: &Args) {
    if let Some(path) = &args.catalog {
        config.catalog_path = Some(path.clone());
    }
}

/// Scans every SKU in order. An unknown SKU aborts unless `skip_invalid` is set.
fn scan_all(checkout: &mut Checkout<'_>, skus: &[String], skip_invalid: bool) -> Result<()> {
    for sku in skus {
        match checkout.scan(sku) {
            Ok(()) => {}
            Err(CoreError::InvalidSku(sku)) if skip_invalid => {
                warn!(sku = %sku, "Skipping unknown SKU");
            }
            Err(e) => return Err(e).context("Checkout aborted"),
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over `CHECKOUT_LOG`. Logs go to stderr so stdout only
/// carries the receipt.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("Failed to load catalog {}", path.display()))
}

/// Plain-text receipt. Rules that did not fire are left off.
fn render_receipt(totals: &CheckoutTotals) -> String {
    let mut out = String::new();
    out.push_str(&format!("Items:    {}\n", totals.item_count));
    out.push_str(&format!("Subtotal: {}\n", totals.subtotal()));
    for adjustment in totals.adjustments.iter().filter(|a| a.amount_cents != 0) {
        out.push_str(&format!("  {:<24} {}\n", adjustment.rule, adjustment.amount()));
    }
    out.push_str(&format!("Discount: {}\n", totals.discount()));
    out.push_str(&format!("Total:    {}\n", totals.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_receipt() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);
        for sku in ["atv", "atv", "atv", "vga"] {
            checkout.scan(sku).unwrap();
        }

        let receipt = render_receipt(&checkout.totals());
        let lines: Vec<&str> = receipt.lines().collect();

        assert_eq!(lines[0], "Items:    4");
        assert_eq!(lines[1], "Subtotal: $358.50");
        assert!(lines[2].contains("3 for 2 on atv"));
        assert!(lines[2].ends_with("-$109.50"));
        assert_eq!(lines[3], "Discount: -$109.50");
        assert_eq!(lines[4], "Total:    $249.00");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_receipt_empty() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let checkout = Checkout::new(&catalog, &rules);

        let receipt = render_receipt(&checkout.totals());
        assert!(receipt.ends_with("Total:    $0.00\n"));
        // no adjustment lines when nothing fired
        assert_eq!(receipt.lines().count(), 4);
    }

    fn skus(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scan_all_aborts_on_unknown_sku() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);

        let err = scan_all(&mut checkout, &skus(&["mbp", "xyz", "ipd"]), false).unwrap_err();

        assert_eq!(err.to_string(), "Checkout aborted");
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidSku(sku)) if sku == "xyz"
        ));
        assert!(format!("{:#}", err).contains("Invalid SKU: xyz"));
        // scanning stopped at the unknown SKU
        assert_eq!(checkout.item_count(), 1);
    }

    #[test]
    fn test_scan_all_skips_unknown_sku() {
        let catalog = Catalog::opening_day();
        let rules = PricingRules::opening_day();
        let mut checkout = Checkout::new(&catalog, &rules);

        scan_all(&mut checkout, &skus(&["mbp", "xyz", "ipd"]), true).unwrap();

        assert_eq!(checkout.item_count(), 2);
        assert_eq!(checkout.count_of("xyz"), 0);
        assert_eq!(checkout.total().to_string(), "$1949.98");
    }

    #[test]
    fn test_catalog_flag_overrides_environment() {
        let mut config = CliConfig {
            catalog_path: Some(PathBuf::from("/env/catalog.json")),
            ..CliConfig::default()
        };
        let args = Args {
            catalog: Some(PathBuf::from("flag.json")),
            ..Args::default()
        };

        apply_args(&mut config, &args);
        assert_eq!(config.catalog_path, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn test_environment_catalog_kept_without_flag() {
        let mut config = CliConfig {
            catalog_path: Some(PathBuf::from("/env/catalog.json")),
            ..CliConfig::default()
        };

        apply_args(&mut config, &Args::default());
        assert_eq!(config.catalog_path, Some(PathBuf::from("/env/catalog.json")));
    }

    #[test]
    fn test_help_skips_environment() {
        let args = Args {
            help: true,
            ..Args::default()
        };
        let config = startup_config(&args, || {
            Err(ConfigError::InvalidValue("CHECKOUT_SKIP_INVALID".to_string()))
        })
        .unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_bad_environment_fails_without_help() {
        let err = startup_config(&Args::default(), || {
            Err(ConfigError::InvalidValue("CHECKOUT_SKIP_INVALID".to_string()))
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CHECKOUT_SKIP_INVALID");
    }

    #[test]
    fn test_startup_applies_catalog_flag() {
        let args = Args {
            catalog: Some(PathBuf::from("flag.json")),
            ..Args::default()
        };
        let config = startup_config(&args, || {
            Ok(CliConfig {
                catalog_path: Some(PathBuf::from("/env/catalog.json")),
                skip_invalid: true,
                ..CliConfig::default()
            })
        })
        .unwrap()
        .unwrap();

        assert_eq!(config.catalog_path, Some(PathBuf::from("flag.json")));
        assert!(config.skip_invalid);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }
}
