//! Company entity - Represents a borrower in the advisory portfolio.
//!
//! Each company has descriptive attributes, a primary finance contact and free-text notes.
//! Companies own zero or more loans through `loan::Model::company_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Unique identifier for the company
    pub id: String,
    /// Legal or trading name (e.g., "Premier Retail Group")
    pub name: String,
    /// Industry label used for filtering (e.g., "Technology", "Energy")
    pub industry: String,
    /// Headquarters location, typically "City, ST"
    pub location: String,
    /// Annual revenue in USD
    pub revenue: f64,
    /// Headcount
    pub employees: u32,
    /// Public website URL
    pub website: String,
    /// Primary finance contact at the company
    pub contact_info: ContactInfo,
    /// Free-text relationship notes
    #[serde(default)]
    pub notes: String,
    /// When the company was added to the portfolio
    pub created_at: DateTime<Utc>,
}

/// Contact details for the person the advisor deals with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
}
