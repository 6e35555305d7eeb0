//! In-memory portfolio store.
//!
//! `PortfolioStore` is constructed once at start-up and passed by reference to whatever reads
//! it. Reads hand out fresh snapshots with status and days-until-maturity derived against the
//! caller's `now`. The only mutation a view may invoke is [`PortfolioStore::set_alert_dismissed`].

use crate::{
    config::settings::DashboardSettings,
    core::{
        alerts::{AlertHistory, AlertRow, generate_alerts},
        dashboard::{
            AlertSummary, CompanyPortfolio, DashboardSummary, LoanRow, company_portfolio,
            summarize_alerts, summarize_dashboard,
        },
        priority::AlertPolicy,
        query::{AlertFilter, CompanyFilter, LoanFilter, industries},
        status::{DerivedLoan, derive_loan, derive_loans},
        timeline::{MaturityBucket, group_by_maturity_month},
    },
    entities::{Alert, AlertType, Company, Loan},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Flat collections of companies, loans and alerts.
#[derive(Debug, Clone, Default)]
pub struct PortfolioStore {
    companies: Vec<Company>,
    loans: Vec<Loan>,
    alerts: Vec<Alert>,
}

fn ensure_unique<'a>(entity: &'static str, ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Checks the invariants a loan record must satisfy on its own.
///
/// # Errors
/// Returns `Error::InvalidLoan` for a non-positive amount, a negative or non-finite rate, or an
/// origination date that is not strictly before maturity.
pub fn validate_loan(loan: &Loan) -> Result<()> {
    let invalid = |reason: String| Error::InvalidLoan {
        id: loan.id.clone(),
        reason,
    };

    if !loan.amount.is_finite() || loan.amount <= 0.0 {
        return Err(invalid(format!("amount must be positive, got {}", loan.amount)));
    }
    if !loan.interest_rate.is_finite() || loan.interest_rate < 0.0 {
        return Err(invalid(format!(
            "interest rate must be non-negative, got {}",
            loan.interest_rate
        )));
    }
    if loan.origination_date >= loan.maturity_date {
        return Err(invalid(format!(
            "origination {} is not before maturity {}",
            loan.origination_date, loan.maturity_date
        )));
    }
    Ok(())
}

impl PortfolioStore {
    /// Builds a store from seed records.
    ///
    /// Ids must be unique per entity and every loan must pass [`validate_loan`]. References to
    /// unknown companies or loans are accepted and logged; reads render them as placeholders.
    ///
    /// # Errors
    /// Returns `Error::DuplicateId` or `Error::InvalidLoan`.
    pub fn new(companies: Vec<Company>, loans: Vec<Loan>, alerts: Vec<Alert>) -> Result<Self> {
        ensure_unique("company", companies.iter().map(|c| c.id.as_str()))?;
        ensure_unique("loan", loans.iter().map(|l| l.id.as_str()))?;
        ensure_unique("alert", alerts.iter().map(|a| a.id.as_str()))?;
        loans.iter().try_for_each(validate_loan)?;

        let store = Self {
            companies,
            loans,
            alerts,
        };

        for problem in store.unresolved_references() {
            warn!("{}", problem);
        }
        info!(
            companies = store.companies.len(),
            loans = store.loans.len(),
            alerts = store.alerts.len(),
            "Portfolio store initialised"
        );
        Ok(store)
    }

    /// Every company, in seed order.
    #[must_use]
    pub fn list_companies(&self) -> &[Company] {
        &self.companies
    }

    /// Companies matching `filter`, in seed order.
    #[must_use]
    pub fn filter_companies(&self, filter: &CompanyFilter) -> Vec<&Company> {
        self.companies.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Loans matching `filter`, derived against `now` and joined with their borrower's name.
    #[must_use]
    pub fn list_loans(&self, now: DateTime<Utc>, filter: &LoanFilter) -> Vec<LoanRow> {
        self.loans
            .iter()
            .map(|loan| {
                let company_name = self.company(&loan.company_id).map(|c| c.name.clone());
                LoanRow {
                    loan: derive_loan(loan, now),
                    company_name,
                }
            })
            .filter(|row| filter.matches(&row.loan, row.company_name.as_deref()))
            .collect()
    }

    /// Alerts matching `filter`, joined with their loan and company, in store order.
    ///
    /// Priorities are derived against `now` under `policy` before the filter is applied.
    #[must_use]
    pub fn list_alerts(
        &self,
        now: DateTime<Utc>,
        policy: &AlertPolicy,
        filter: &AlertFilter,
    ) -> Vec<AlertRow> {
        self.alert_rows(now, policy)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect()
    }

    fn alert_rows(&self, now: DateTime<Utc>, policy: &AlertPolicy) -> Vec<AlertRow> {
        self.alerts
            .iter()
            .map(|alert| {
                AlertRow::resolve(
                    alert,
                    self.loan(&alert.loan_id),
                    self.company(&alert.company_id),
                    now,
                    policy,
                )
            })
            .collect()
    }

    /// Every loan derived against `now`, in seed order.
    #[must_use]
    pub fn derived_loans(&self, now: DateTime<Utc>) -> Vec<DerivedLoan> {
        derive_loans(&self.loans, now)
    }

    #[must_use]
    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn loan(&self, id: &str) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn alert(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Borrower of `loan`.
    ///
    /// # Errors
    /// Returns `Error::UnresolvedReference` when the company does not exist.
    pub fn company_for_loan(&self, loan: &Loan) -> Result<&Company> {
        self.company(&loan.company_id)
            .ok_or_else(|| Error::UnresolvedReference {
                entity: "company",
                id: loan.company_id.clone(),
                referenced_by: format!("loan {}", loan.id),
            })
    }

    /// Loan that `alert` is about.
    ///
    /// # Errors
    /// Returns `Error::UnresolvedReference` when the loan does not exist.
    pub fn loan_for_alert(&self, alert: &Alert) -> Result<&Loan> {
        self.loan(&alert.loan_id)
            .ok_or_else(|| Error::UnresolvedReference {
                entity: "loan",
                id: alert.loan_id.clone(),
                referenced_by: format!("alert {}", alert.id),
            })
    }

    /// Every dangling foreign key in the store.
    #[must_use]
    pub fn unresolved_references(&self) -> Vec<Error> {
        let loan_refs = self
            .loans
            .iter()
            .filter_map(|loan| self.company_for_loan(loan).err());
        let alert_refs = self.alerts.iter().flat_map(|alert| {
            let company = self
                .company(&alert.company_id)
                .is_none()
                .then(|| Error::UnresolvedReference {
                    entity: "company",
                    id: alert.company_id.clone(),
                    referenced_by: format!("alert {}", alert.id),
                });
            [self.loan_for_alert(alert).err(), company]
                .into_iter()
                .flatten()
        });
        loan_refs.chain(alert_refs).collect()
    }

    /// Sets the `dismissed` flag of one alert, replacing the record by id.
    ///
    /// Setting the flag to its current value is a no-op. No other alert is touched.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when no alert has this id.
    pub fn set_alert_dismissed(&mut self, alert_id: &str, dismissed: bool) -> Result<()> {
        let slot = self
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| Error::NotFound {
                entity: "alert",
                id: alert_id.to_string(),
            })?;

        if slot.dismissed != dismissed {
            *slot = Alert {
                dismissed,
                ..slot.clone()
            };
        }
        debug!(alert_id, dismissed, "Alert dismissed flag set");
        Ok(())
    }

    /// Raises the alerts the portfolio is missing.
    ///
    /// A loan gets one maturity warning, after which its `alert_sent` flag is set; a warning
    /// already on file counts as sent. Each breached covenant metric gets one breach alert
    /// regardless of that flag. Loans whose company is unknown are skipped. New ids continue
    /// after the largest numeric id on file.
    ///
    /// Returns the ids of the new alerts.
    ///
    /// # Errors
    /// Returns `Error::AlertIdsExhausted` when no numeric id is left for a new alert.
    pub fn raise_alerts(
        &mut self,
        now: DateTime<Utc>,
        policy: &AlertPolicy,
    ) -> Result<Vec<String>> {
        let first_id = match self
            .alerts
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
        {
            Some(last_id) => last_id
                .checked_add(1)
                .ok_or(Error::AlertIdsExhausted { last_id })?,
            None => 1,
        };

        let raised = {
            let eligible = self.loans.iter().filter(|loan| {
                let known = self.company(&loan.company_id).is_some();
                if !known {
                    warn!(
                        loan_id = %loan.id,
                        company_id = %loan.company_id,
                        "Not raising alerts for loan with unknown company"
                    );
                }
                known
            });
            let history = AlertHistory::new(&self.loans, &self.alerts);
            generate_alerts(eligible, now, policy, &history, first_id)?
        };

        let warned: HashSet<&str> = raised
            .iter()
            .filter(|a| a.alert_type == AlertType::MaturityWarning)
            .map(|a| a.loan_id.as_str())
            .collect();
        for loan in &mut self.loans {
            if warned.contains(loan.id.as_str()) {
                loan.alert_sent = true;
            }
        }

        let ids: Vec<String> = raised.iter().map(|a| a.id.clone()).collect();
        info!(count = ids.len(), "Raised new alerts");
        self.alerts.extend(raised);
        Ok(ids)
    }

    /// Overview numbers as of `now`.
    #[must_use]
    pub fn dashboard(
        &self,
        now: DateTime<Utc>,
        settings: &DashboardSettings,
        policy: &AlertPolicy,
    ) -> DashboardSummary {
        summarize_dashboard(
            &self.companies,
            &self.derived_loans(now),
            &self.alert_rows(now, policy),
            settings,
        )
    }

    #[must_use]
    pub fn alert_summary(&self, now: DateTime<Utc>, policy: &AlertPolicy) -> AlertSummary {
        summarize_alerts(&self.alert_rows(now, policy))
    }

    /// Detail view of one company, `None` if the id is unknown.
    #[must_use]
    pub fn company_portfolio(
        &self,
        company_id: &str,
        now: DateTime<Utc>,
    ) -> Option<CompanyPortfolio> {
        self.company(company_id)
            .map(|company| company_portfolio(company, &self.derived_loans(now)))
    }

    /// Loans grouped by maturity month as of `now`.
    #[must_use]
    pub fn timeline(&self, now: DateTime<Utc>) -> Vec<MaturityBucket> {
        group_by_maturity_month(&self.derived_loans(now))
    }

    #[must_use]
    pub fn industries(&self) -> Vec<String> {
        industries(&self.companies)
    }
}
