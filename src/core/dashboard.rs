//! Dashboard and company summaries.
//!
//! This module produces the structured numbers behind the overview page, the alert feed
//! header and the company detail page. All functions are framework-agnostic and return plain
//! data that a view layer formats.

use crate::{
    config::settings::DashboardSettings,
    core::{
        alerts::AlertRow,
        query::{loans_for_company, total_exposure},
        status::DerivedLoan,
    },
    entities::{AlertPriority, Company, LoanStatus},
};

/// A derived loan joined with its borrower's name, `None` when the company is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRow {
    pub loan: DerivedLoan,
    pub company_name: Option<String>,
}

/// Headline numbers for the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_companies: usize,
    pub active_loans: usize,
    /// Loans due after today and within the upcoming horizon
    pub upcoming_loans: usize,
    pub total_loan_value: f64,
    /// Non-dismissed alerts currently at High or Critical, in store order
    pub urgent_alerts: Vec<AlertRow>,
    /// Most recently added companies, newest first
    pub recent_companies: Vec<Company>,
}

/// Counts shown above the alert feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub dismissed: usize,
}

/// A company with its loans and exposure, for the company detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPortfolio {
    pub company: Company,
    pub loans: Vec<DerivedLoan>,
    pub total_amount: f64,
    pub active_count: usize,
}

/// Builds the overview summary. `loans` and `alerts` must be derived against the same instant.
#[must_use]
pub fn summarize_dashboard(
    companies: &[Company],
    loans: &[DerivedLoan],
    alerts: &[AlertRow],
    settings: &DashboardSettings,
) -> DashboardSummary {
    let active_loans = loans
        .iter()
        .filter(|l| l.status == LoanStatus::Active)
        .count();
    let upcoming_loans = loans
        .iter()
        .filter(|l| {
            l.days_until_maturity > 0 && l.days_until_maturity <= settings.upcoming_horizon_days
        })
        .count();

    let urgent_alerts = alerts
        .iter()
        .filter(|row| !row.alert.dismissed && row.priority.is_urgent())
        .take(settings.urgent_alert_limit)
        .cloned()
        .collect();

    let mut recent_companies = companies.to_vec();
    recent_companies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent_companies.truncate(settings.recent_company_limit);

    DashboardSummary {
        total_companies: companies.len(),
        active_loans,
        upcoming_loans,
        total_loan_value: total_exposure(loans),
        urgent_alerts,
        recent_companies,
    }
}

/// Counts non-dismissed alerts per current priority, plus the number dismissed.
#[must_use]
pub fn summarize_alerts(alerts: &[AlertRow]) -> AlertSummary {
    alerts.iter().fold(AlertSummary::default(), |mut summary, row| {
        if row.alert.dismissed {
            summary.dismissed += 1;
        } else {
            match row.priority {
                AlertPriority::Critical => summary.critical += 1,
                AlertPriority::High => summary.high += 1,
                AlertPriority::Medium => summary.medium += 1,
                AlertPriority::Low => summary.low += 1,
            }
        }
        summary
    })
}

/// Collects the loans of `company` and totals its exposure.
#[must_use]
pub fn company_portfolio(company: &Company, loans: &[DerivedLoan]) -> CompanyPortfolio {
    let company_loans: Vec<DerivedLoan> = loans_for_company(loans, &company.id)
        .into_iter()
        .cloned()
        .collect();
    CompanyPortfolio {
        company: company.clone(),
        total_amount: total_exposure(&company_loans),
        active_count: company_loans
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .count(),
        loans: company_loans,
    }
}
