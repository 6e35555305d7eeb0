//! Display formatting for amounts, dates and maturity countdowns.

use chrono::NaiveDate;

/// Compact currency format: `$2.1B`, `$50.0M`, `$950.0K`, `$950`.
///
/// Amounts under a thousand keep up to three fraction digits without trailing zeros.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{sign}${:.1}B", magnitude / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{sign}${:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}${:.1}K", magnitude / 1_000.0)
    } else {
        let rounded = (magnitude * 1_000.0).round() / 1_000.0;
        format!("{sign}${rounded}")
    }
}

/// Medium-length date such as "Jun 15, 2025".
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Human-readable countdown for a signed days-until-maturity value.
#[must_use]
pub fn format_days_remaining(days: i64) -> String {
    match days {
        0 => "matures today".to_string(),
        1 => "1 day remaining".to_string(),
        -1 => "matured 1 day ago".to_string(),
        d if d < 0 => format!("matured {} days ago", -d),
        d => format!("{d} days remaining"),
    }
}
