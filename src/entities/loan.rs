//! Loan entity - Represents a single credit facility owed by a company.
//!
//! The stored record holds only facts. Lifecycle status is not a field here: it is a view of
//! the current date and is produced by `core::status::derive_loan`, so it can never drift
//! away from `maturity_date`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loan record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Unique identifier for the loan
    pub id: String,
    /// ID of the borrowing company
    pub company_id: String,
    /// Facility type label (e.g., "Term Loan", "Bridge Loan")
    #[serde(rename = "type")]
    pub loan_type: String,
    /// Principal amount, always positive
    pub amount: f64,
    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Lender name
    pub lender: String,
    /// Date the facility was drawn
    pub origination_date: NaiveDate,
    /// Date the principal becomes due; strictly after `origination_date`
    pub maturity_date: NaiveDate,
    /// Annual interest rate as a percentage (5.25 means 5.25%)
    pub interest_rate: f64,
    /// Free-text covenant description as written in the credit agreement
    #[serde(default)]
    pub covenants: String,
    /// Latest measured covenant tests, if the borrower has reported any
    #[serde(default)]
    pub covenant_tests: Vec<CovenantTest>,
    /// Whether a maturity alert has already been raised for this loan
    #[serde(default)]
    pub alert_sent: bool,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Lifecycle state of a loan relative to a reference date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Upcoming,
    #[serde(rename = "Maturing Soon")]
    MaturingSoon,
    Matured,
}

impl LoanStatus {
    /// Every status, least urgent first.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::Upcoming,
        Self::MaturingSoon,
        Self::Matured,
    ];

    /// Ordinal urgency used for sorting loans; higher is more urgent.
    #[must_use]
    pub const fn urgency_rank(self) -> u8 {
        match self {
            Self::Active => 1,
            Self::Upcoming => 2,
            Self::MaturingSoon => 3,
            Self::Matured => 4,
        }
    }

    /// Display label as shown on the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Upcoming => "Upcoming",
            Self::MaturingSoon => "Maturing Soon",
            Self::Matured => "Matured",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown loan status: {s}"))
    }
}

/// Direction in which a covenant limit applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovenantBound {
    /// Observed value must stay at or below the threshold (e.g., Debt-to-EBITDA < 3.0x)
    Ceiling,
    /// Observed value must stay at or above the threshold (e.g., DSCR >= 1.25x)
    Floor,
}

/// A single measured covenant test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CovenantTest {
    /// Metric name, e.g. "Debt-to-EBITDA"
    pub metric: String,
    pub bound: CovenantBound,
    pub threshold: f64,
    pub observed: f64,
}

impl CovenantTest {
    /// Returns true when the observed value violates the covenant limit.
    #[must_use]
    pub fn is_breached(&self) -> bool {
        match self.bound {
            CovenantBound::Ceiling => self.observed > self.threshold,
            CovenantBound::Floor => self.observed < self.threshold,
        }
    }
}
