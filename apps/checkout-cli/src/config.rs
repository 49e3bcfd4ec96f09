//! Checkout CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Command-line flags override what is read here.

use std::env;
use std::path::PathBuf;

/// Default log filter: warnings only, so stdout/stderr stay quiet on a clean run.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Checkout CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// JSON catalog file; the built-in opening-day catalog when unset
    pub catalog_path: Option<PathBuf>,

    /// tracing filter directive (`RUST_LOG` syntax)
    pub log_filter: String,

    /// Skip unknown SKUs with a warning instead of aborting the checkout
    pub skip_invalid: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            skip_invalid: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Default |
    /// |-------------------------|---------|
    /// | `CHECKOUT_CATALOG`      | unset   |
    /// | `CHECKOUT_LOG`          | `warn`  |
    /// | `CHECKOUT_SKIP_INVALID` | `false` |
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CliConfig {
            catalog_path: lookup("CHECKOUT_CATALOG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            log_filter: lookup("CHECKOUT_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),

            skip_invalid: match lookup("CHECKOUT_SKIP_INVALID") {
                Some(value) => parse_bool(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("CHECKOUT_SKIP_INVALID".to_string()))?,
                None => false,
            },
        };

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
