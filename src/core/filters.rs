//! View state for the loan table, company table and alert feed.
//!
//! State is an explicit value: a view holds the current state, feeds it an action through
//! `reduce`, and keeps the returned state. Nothing here touches the store except the alert
//! feed, whose dismiss/restore actions are forwarded by [`AlertFeedState::apply`].

use crate::{
    core::query::{AlertFilter, CompanyFilter, LoanFilter},
    entities::{AlertPriority, LoanStatus},
    errors::Result,
    store::PortfolioStore,
};

/// Search box and status dropdown of the loan table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanTableState {
    pub search: String,
    pub status: Option<LoanStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanTableAction {
    SetSearch(String),
    /// `None` selects "All"
    SetStatus(Option<LoanStatus>),
    Reset,
}

impl LoanTableState {
    #[must_use]
    pub fn reduce(self, action: LoanTableAction) -> Self {
        match action {
            LoanTableAction::SetSearch(search) => Self { search, ..self },
            LoanTableAction::SetStatus(status) => Self { status, ..self },
            LoanTableAction::Reset => Self::default(),
        }
    }

    #[must_use]
    pub fn filter(&self) -> LoanFilter {
        LoanFilter {
            status: self.status,
            search: Some(self.search.clone()),
            company_id: None,
        }
    }
}

/// Search box and industry dropdown of the company table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyTableState {
    pub search: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyTableAction {
    SetSearch(String),
    /// `None` selects "All"
    SetIndustry(Option<String>),
    Reset,
}

impl CompanyTableState {
    #[must_use]
    pub fn reduce(self, action: CompanyTableAction) -> Self {
        match action {
            CompanyTableAction::SetSearch(search) => Self { search, ..self },
            CompanyTableAction::SetIndustry(industry) => Self { industry, ..self },
            CompanyTableAction::Reset => Self::default(),
        }
    }

    #[must_use]
    pub fn filter(&self) -> CompanyFilter {
        CompanyFilter {
            industry: self.industry.clone(),
            search: Some(self.search.clone()),
        }
    }
}

/// Priority dropdown of the alert feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFeedState {
    pub priority: Option<AlertPriority>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertFeedAction {
    /// `None` selects "All"
    SetPriority(Option<AlertPriority>),
    Dismiss(String),
    Restore(String),
}

impl AlertFeedState {
    /// Applies a filter change to the view state. Dismiss and restore leave it unchanged.
    #[must_use]
    pub const fn reduce(self, action: &AlertFeedAction) -> Self {
        match action {
            AlertFeedAction::SetPriority(priority) => Self {
                priority: *priority,
            },
            AlertFeedAction::Dismiss(_) | AlertFeedAction::Restore(_) => self,
        }
    }

    /// Applies `action` to both the view state and, for dismiss/restore, the store.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when a dismiss/restore names an unknown alert.
    pub fn apply(self, action: &AlertFeedAction, store: &mut PortfolioStore) -> Result<Self> {
        match action {
            AlertFeedAction::Dismiss(id) => store.set_alert_dismissed(id, true)?,
            AlertFeedAction::Restore(id) => store.set_alert_dismissed(id, false)?,
            AlertFeedAction::SetPriority(_) => {}
        }
        Ok(self.reduce(action))
    }

    /// Filter for the active (non-dismissed) section of the feed.
    #[must_use]
    pub const fn active_filter(&self) -> AlertFilter {
        AlertFilter {
            priority: self.priority,
            dismissed: Some(false),
        }
    }

    /// Filter for the dismissed section of the feed.
    #[must_use]
    pub const fn dismissed_filter(&self) -> AlertFilter {
        AlertFilter {
            priority: self.priority,
            dismissed: Some(true),
        }
    }
}
