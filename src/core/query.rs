//! Filtering, sorting and aggregation over in-memory collections.
//!
//! Every helper here is a pure function of its inputs. Filters combine their fields with
//! logical AND; a `None` field matches everything. Text search is a case-insensitive substring
//! match, and an empty or whitespace-only search term matches every record.

use crate::{
    core::{alerts::AlertRow, status::DerivedLoan},
    entities::{AlertPriority, Company, LoanStatus},
};
use std::collections::HashMap;

/// Predicate over derived loans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanFilter {
    pub status: Option<LoanStatus>,
    /// Matched against company name, lender and loan type
    pub search: Option<String>,
    pub company_id: Option<String>,
}

/// Predicate over companies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub industry: Option<String>,
    /// Matched against company name and location
    pub search: Option<String>,
}

/// Predicate over alert rows. `priority` matches the row's current priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub priority: Option<AlertPriority>,
    pub dismissed: Option<bool>,
}

/// Case-insensitive substring match of `needle` against any of `haystacks`.
fn matches_search<'a>(
    needle: Option<&str>,
    haystacks: impl IntoIterator<Item = &'a str>,
) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    haystacks
        .into_iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

impl LoanFilter {
    /// `company_name` is the resolved borrower name, if any, so search can match it.
    #[must_use]
    pub fn matches(&self, loan: &DerivedLoan, company_name: Option<&str>) -> bool {
        let status_ok = self.status.is_none_or(|s| s == loan.status);
        let company_ok = self
            .company_id
            .as_deref()
            .is_none_or(|id| id == loan.loan.company_id);
        let search_ok = matches_search(
            self.search.as_deref(),
            company_name
                .into_iter()
                .chain([loan.loan.lender.as_str(), loan.loan.loan_type.as_str()]),
        );
        status_ok && company_ok && search_ok
    }
}

impl CompanyFilter {
    #[must_use]
    pub fn matches(&self, company: &Company) -> bool {
        let industry_ok = self
            .industry
            .as_deref()
            .is_none_or(|industry| industry == company.industry);
        industry_ok
            && matches_search(
                self.search.as_deref(),
                [company.name.as_str(), company.location.as_str()],
            )
    }
}

impl AlertFilter {
    #[must_use]
    pub fn matches(&self, row: &AlertRow) -> bool {
        self.priority.is_none_or(|p| p == row.priority)
            && self.dismissed.is_none_or(|d| d == row.alert.dismissed)
    }
}

/// Sorts alert rows most urgent first by current priority. Ties keep their original order.
pub fn sort_alerts_by_priority(rows: &mut [AlertRow]) {
    rows.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
}

/// Sorts loans most urgent status first. Ties keep their original order.
pub fn sort_loans_by_urgency(loans: &mut [DerivedLoan]) {
    loans.sort_by(|a, b| b.status.urgency_rank().cmp(&a.status.urgency_rank()));
}

/// Total principal across `loans`; zero for an empty set.
pub fn total_exposure<'a, I>(loans: I) -> f64
where
    I: IntoIterator<Item = &'a DerivedLoan>,
{
    loans.into_iter().map(|l| l.loan.amount).sum()
}

/// Number of loans in each status. Statuses with no loans are absent.
pub fn count_by_status<'a, I>(loans: I) -> HashMap<LoanStatus, usize>
where
    I: IntoIterator<Item = &'a DerivedLoan>,
{
    let mut counts = HashMap::new();
    for loan in loans {
        *counts.entry(loan.status).or_insert(0) += 1;
    }
    counts
}

/// Distinct industries in the order they first appear.
#[must_use]
pub fn industries(companies: &[Company]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for company in companies {
        if !seen.contains(&company.industry) {
            seen.push(company.industry.clone());
        }
    }
    seen
}

/// Loans owed by `company_id`, in their original order.
#[must_use]
pub fn loans_for_company<'a>(loans: &'a [DerivedLoan], company_id: &str) -> Vec<&'a DerivedLoan> {
    loans
        .iter()
        .filter(|l| l.loan.company_id == company_id)
        .collect()
}
