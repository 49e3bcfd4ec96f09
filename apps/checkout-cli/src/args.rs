//! Command-line arguments.

use std::path::PathBuf;

pub const USAGE: &str = "\
Checkout Total Calculator

Usage: checkout [OPTIONS] <SKU>...

Options:
  -c, --catalog <PATH>  JSON catalog file (default: built-in opening-day catalog)
  -j, --json            Print totals as JSON
  -h, --help            Show this help message

Environment:
  CHECKOUT_CATALOG       Catalog file when --catalog is not given
  CHECKOUT_LOG           Log filter (default: warn)
  CHECKOUT_SKIP_INVALID  Skip unknown SKUs instead of aborting (default: false)";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub catalog: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
    /// SKUs in scan order.
    pub skus: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

impl Args {
    /// Parses arguments, program name excluded.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" | "-c" => {
                    let path = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                    parsed.catalog = Some(PathBuf::from(path));
                }
                "--json" | "-j" => parsed.json = true,
                "--help" | "-h" => parsed.help = true,
                // everything after `--` is a SKU
                "--" => parsed.skus.extend(args.by_ref()),
                other if other.starts_with('-') => {
                    return Err(ArgsError::UnknownOption(other.to_string()));
                }
                _ => parsed.skus.push(arg),
            }
        }

        Ok(parsed)
    }
}
