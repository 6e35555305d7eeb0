//! Application settings loading from config.toml
//!
//! Settings cover the alert priority policy and the dashboard limits. Every field has a
//! default, so an empty file (or no file at all) yields a working configuration. The location of
//! the file and an optional pinned reference time come from environment variables.

use crate::{
    core::priority::AlertPolicy,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "LOAN_TRACKER_CONFIG";
/// Environment variable pinning "now" for reproducible output.
pub const AS_OF_VAR: &str = "LOAN_TRACKER_AS_OF";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Alert priority thresholds and escalation rules
    pub alert_policy: AlertPolicy,
    /// Limits and horizons used by the overview page
    pub dashboard: DashboardSettings,
}

/// Limits and horizons used by the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Maximum number of urgent alerts shown on the overview
    pub urgent_alert_limit: usize,
    /// Maximum number of recently added companies shown on the overview
    pub recent_company_limit: usize,
    /// Loans due within this many days count as upcoming
    pub upcoming_horizon_days: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            urgent_alert_limit: 3,
            recent_company_limit: 3,
            upcoming_horizon_days: 180,
        }
    }
}

/// Parses and validates settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or the alert policy is inconsistent.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.alert_policy.validate()?;
    if config.dashboard.upcoming_horizon_days < 0 {
        return Err(Error::Config {
            message: "dashboard.upcoming_horizon_days cannot be negative".to_string(),
        });
    }
    Ok(config)
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The alert policy thresholds are out of order
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Gets the settings path from `LOAN_TRACKER_CONFIG`, falling back to `./config.toml`.
///
/// The flag is true when the path was set explicitly.
#[must_use]
pub fn get_config_path() -> (PathBuf, bool) {
    std::env::var(CONFIG_PATH_VAR).map_or_else(
        |_| (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        |path| (PathBuf::from(path), true),
    )
}

/// Loads the application settings.
///
/// An explicitly configured file must exist. When no path is configured and `./config.toml` is
/// absent, built-in defaults are used.
///
/// # Errors
/// Returns `Error::Config` when the selected file cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let (path, explicit) = get_config_path();
    if !explicit && !path.exists() {
        warn!(
            "No {} found and {} not set; using default settings",
            DEFAULT_CONFIG_PATH, CONFIG_PATH_VAR
        );
        return Ok(AppConfig::default());
    }
    let config = load_config(&path)?;
    info!("Loaded settings from {}", path.display());
    Ok(config)
}

/// Parses a reference time given as RFC 3339 or as a plain `YYYY-MM-DD` (midnight UTC).
///
/// # Errors
/// Returns `Error::Config` when the value matches neither form.
pub fn parse_reference_time(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| Error::Config {
            message: format!("Invalid {AS_OF_VAR} value {value:?}: {e}"),
        })
}

/// Reads the clock once, unless `LOAN_TRACKER_AS_OF` pins the reference time.
///
/// # Errors
/// Returns `Error::Config` when `LOAN_TRACKER_AS_OF` is set but unparsable.
pub fn reference_time() -> Result<DateTime<Utc>> {
    match std::env::var(AS_OF_VAR) {
        Ok(value) => parse_reference_time(&value),
        Err(_) => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.alert_policy.critical_within_days, 15);
        assert_eq!(config.dashboard.urgent_alert_limit, 3);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [alert_policy]
            critical_within_days = 10
            escalation_rate = 9.5
            escalating_loan_types = ["Bridge Loan"]

            [dashboard]
            recent_company_limit = 5
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.alert_policy.critical_within_days, 10);
        assert_eq!(config.alert_policy.high_within_days, 60);
        assert_eq!(config.alert_policy.escalation_rate, 9.5);
        assert_eq!(config.alert_policy.escalating_loan_types, vec!["Bridge Loan"]);
        assert_eq!(config.dashboard.recent_company_limit, 5);
        assert_eq!(config.dashboard.urgent_alert_limit, 3);
    }

    #[test]
    fn test_rejects_inconsistent_policy() {
        let toml_str = r"
            [alert_policy]
            critical_within_days = 90
        ";
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(parse_config("[alert_policy").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_reference_time() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_reference_time("2025-01-02").unwrap(), expected);
        assert_eq!(
            parse_reference_time("2025-01-02T00:00:00Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_reference_time("2025-01-02T02:00:00+02:00").unwrap(),
            expected
        );
        assert!(parse_reference_time("next tuesday").is_err());
    }
}
