//! Portfolio seed loading from a TOML file.
//!
//! The file mirrors the entity records: `[[companies]]`, `[[loans]]` and `[[alerts]]` arrays
//! with snake_case keys. Dates are quoted `YYYY-MM-DD` strings and timestamps quoted RFC 3339
//! strings. Loans carry no status; it is derived when the store is read.

use crate::{
    entities::{Alert, Company, Loan},
    errors::{Error, Result},
    store::PortfolioStore,
};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional portfolio file.
pub const PORTFOLIO_PATH_VAR: &str = "LOAN_TRACKER_PORTFOLIO";

/// Structure of a portfolio TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioFile {
    pub companies: Vec<Company>,
    pub loans: Vec<Loan>,
    pub alerts: Vec<Alert>,
}

/// Parses portfolio TOML text and builds a store from it.
///
/// # Errors
/// Returns `Error::Config` for invalid TOML, or the store's validation errors.
pub fn parse_portfolio(contents: &str) -> Result<PortfolioStore> {
    let file: PortfolioFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse portfolio file: {e}"),
    })?;
    PortfolioStore::new(file.companies, file.loans, file.alerts)
}

/// Loads a portfolio from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or a record fails validation.
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<PortfolioStore> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!(
            "Failed to read portfolio file {}: {e}",
            path.as_ref().display()
        ),
    })?;
    parse_portfolio(&contents)
}

/// Gets the portfolio path from `LOAN_TRACKER_PORTFOLIO`, if set.
#[must_use]
pub fn get_portfolio_path() -> Option<String> {
    std::env::var(PORTFOLIO_PATH_VAR).ok()
}
