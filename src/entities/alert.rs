//! Alert entity - A notification about a loan that needs the advisor's attention.
//!
//! `dismissed` is the only field that changes after an alert is created. Days until maturity
//! and the current priority of a maturity warning are derived at read time from the referenced
//! loan, see `core::alerts::AlertRow`; `priority` records the tier the alert was raised with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alert record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Unique identifier for the alert
    pub id: String,
    /// ID of the loan the alert is about
    pub loan_id: String,
    /// ID of the borrowing company
    pub company_id: String,
    /// Kind of alert
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    /// Human-readable message
    pub message: String,
    /// When the alert was raised
    pub created_at: DateTime<Utc>,
    /// Hidden from the active feed by the user
    #[serde(default)]
    pub dismissed: bool,
    /// Covenant metric a breach alert was raised for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covenant_metric: Option<String>,
}

/// Kind of alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "Maturity Warning")]
    MaturityWarning,
    #[serde(rename = "Covenant Breach")]
    CovenantBreach,
    #[serde(rename = "Rate Review")]
    RateReview,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaturityWarning => "Maturity Warning",
            Self::CovenantBreach => "Covenant Breach",
            Self::RateReview => "Rate Review",
        })
    }
}

/// Ordinal urgency tag attached to an alert.
///
/// Variants are declared in rank order so the derived `Ord` matches [`AlertPriority::rank`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertPriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Total ordering used wherever alerts are sorted: Low 1 .. Critical 4.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Next tier up, saturating at `Critical`.
    #[must_use]
    pub const fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }

    /// High and Critical alerts are surfaced on the dashboard.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        })
    }
}

impl FromStr for AlertPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown alert priority: {s}"))
    }
}
