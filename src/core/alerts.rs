//! Alert generation and alert views.
//!
//! Alerts in the demo portfolio are hand-authored, but new ones are raised from loan state by
//! [`generate_alerts`]: a maturity warning for every loan inside the warning horizon and a
//! covenant breach for every failed covenant test. [`AlertHistory`] records what is already on
//! file so neither kind is raised twice.

use crate::{
    core::{priority::AlertPolicy, status::days_until_maturity},
    entities::{Alert, AlertPriority, AlertType, Company, Loan},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// An alert joined with the records it references, derived at `now`.
///
/// Unresolved references show up as `None` so a view can render a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    pub alert: Alert,
    /// Current priority. Maturity warnings are reclassified from their loan's remaining days;
    /// other alerts, and alerts whose loan is unknown, keep the priority they were raised with.
    pub priority: AlertPriority,
    pub days_until_maturity: Option<i64>,
    pub company_name: Option<String>,
    /// "Term Loan • First National Bank"
    pub loan_label: Option<String>,
}

impl AlertRow {
    #[must_use]
    pub fn resolve(
        alert: &Alert,
        loan: Option<&Loan>,
        company: Option<&Company>,
        now: DateTime<Utc>,
        policy: &AlertPolicy,
    ) -> Self {
        let days = loan.map(|l| days_until_maturity(l.maturity_date, now));
        let priority = match (alert.alert_type, loan.zip(days)) {
            (AlertType::MaturityWarning, Some((loan, days))) => {
                policy.classify_maturity(loan, days)
            }
            _ => alert.priority,
        };

        Self {
            alert: alert.clone(),
            priority,
            days_until_maturity: days,
            company_name: company.map(|c| c.name.clone()),
            loan_label: loan.map(|l| format!("{} • {}", l.loan_type, l.lender)),
        }
    }
}

/// Alerts already raised for a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertHistory<'a> {
    /// Loans flagged `alert_sent` or with a maturity warning on file
    pub warned_loans: HashSet<&'a str>,
    /// `(loan id, metric)` pairs with a covenant breach on file
    pub breaches: HashSet<(&'a str, &'a str)>,
}

impl<'a> AlertHistory<'a> {
    /// Builds the history from the `alert_sent` flags of `loans` and the alerts on file.
    #[must_use]
    pub fn new(loans: &'a [Loan], alerts: &'a [Alert]) -> Self {
        let flagged = loans.iter().filter(|l| l.alert_sent).map(|l| l.id.as_str());
        let warned_on_file = alerts
            .iter()
            .filter(|a| a.alert_type == AlertType::MaturityWarning)
            .map(|a| a.loan_id.as_str());
        Self {
            warned_loans: flagged.chain(warned_on_file).collect(),
            breaches: alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::CovenantBreach)
                .filter_map(|a| {
                    a.covenant_metric
                        .as_deref()
                        .map(|metric| (a.loan_id.as_str(), metric))
                })
                .collect(),
        }
    }

    fn is_warned(&self, loan: &Loan) -> bool {
        self.warned_loans.contains(loan.id.as_str())
    }

    fn has_breach(&self, loan: &Loan, metric: &str) -> bool {
        self.breaches.contains(&(loan.id.as_str(), metric))
    }
}

fn maturity_message(loan: &Loan, days: i64, priority: AlertPriority) -> String {
    let headline = match days {
        0 => format!("{} matures today.", loan.loan_type),
        1 => format!("{} matures in 1 day.", loan.loan_type),
        _ => format!("{} matures in {days} days.", loan.loan_type),
    };
    let guidance = match priority {
        AlertPriority::Critical => " Permanent financing must be secured urgently.",
        AlertPriority::High => " Refinancing discussions should begin immediately.",
        AlertPriority::Medium => " Begin refinancing process within next 30 days.",
        AlertPriority::Low => "",
    };
    format!("{headline}{guidance}")
}

/// Raises alerts for `loans` as of `now`, skipping anything `history` already holds.
///
/// Ids are assigned sequentially starting at `first_id`. Loans already past maturity do not get
/// a maturity warning; they are reported through their `Matured` status instead.
///
/// # Errors
/// Returns `Error::AlertIdsExhausted` when the new alerts would need an id beyond `u64::MAX`.
pub fn generate_alerts<'a, I>(
    loans: I,
    now: DateTime<Utc>,
    policy: &AlertPolicy,
    history: &AlertHistory<'_>,
    first_id: u64,
) -> Result<Vec<Alert>>
where
    I: IntoIterator<Item = &'a Loan>,
{
    let mut next_id = Some(first_id);
    let mut alerts = Vec::new();
    let mut push = |loan: &Loan,
                    alert_type,
                    priority,
                    message,
                    covenant_metric|
     -> Result<()> {
        let id = next_id.ok_or(Error::AlertIdsExhausted { last_id: u64::MAX })?;
        next_id = id.checked_add(1);
        alerts.push(Alert {
            id: id.to_string(),
            loan_id: loan.id.clone(),
            company_id: loan.company_id.clone(),
            alert_type,
            priority,
            message,
            created_at: now,
            dismissed: false,
            covenant_metric,
        });
        Ok(())
    };

    for loan in loans {
        let days = days_until_maturity(loan.maturity_date, now);

        if !history.is_warned(loan) && (0..=policy.warning_horizon_days).contains(&days) {
            let priority = policy.classify(AlertType::MaturityWarning, loan, days, false);
            debug!(loan_id = %loan.id, days, %priority, "Raising maturity warning");
            push(
                loan,
                AlertType::MaturityWarning,
                priority,
                maturity_message(loan, days, priority),
                None,
            )?;
        }

        for test in loan
            .covenant_tests
            .iter()
            .filter(|t| t.is_breached() && !history.has_breach(loan, &t.metric))
        {
            let priority = policy.classify(AlertType::CovenantBreach, loan, days, true);
            debug!(loan_id = %loan.id, metric = %test.metric, "Raising covenant breach");
            push(
                loan,
                AlertType::CovenantBreach,
                priority,
                format!(
                    "{} covenant breached on {}: observed {:.2} against a limit of {:.2}.",
                    test.metric, loan.loan_type, test.observed, test.threshold
                ),
                Some(test.metric.clone()),
            )?;
        }
    }

    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CovenantBound, CovenantTest};
    use crate::test_utils::*;
    use chrono::Duration;

    fn dscr_floor(observed: f64) -> CovenantTest {
        CovenantTest {
            metric: "DSCR".to_string(),
            bound: CovenantBound::Floor,
            threshold: 1.25,
            observed,
        }
    }

    #[test]
    fn test_generates_warnings_only_inside_horizon() -> Result<()> {
        let now = fixed_now();
        let loans = vec![
            loan_maturing_in("1", "1", now, 13),
            loan_maturing_in("2", "1", now, 400),
            loan_maturing_in("3", "2", now, -10),
            loan_maturing_in("4", "2", now, 180),
        ];

        let alerts = generate_alerts(
            &loans,
            now,
            &AlertPolicy::default(),
            &AlertHistory::default(),
            10,
        )?;

        let loan_ids: Vec<&str> = alerts.iter().map(|a| a.loan_id.as_str()).collect();
        assert_eq!(loan_ids, vec!["1", "4"]);
        assert_eq!(alerts[0].id, "10");
        assert_eq!(alerts[1].id, "11");
        assert_eq!(alerts[0].priority, AlertPriority::Critical);
        assert_eq!(alerts[1].priority, AlertPriority::Low);
        assert_eq!(alerts[1].company_id, "2");
        assert!(alerts.iter().all(|a| !a.dismissed && a.created_at == now));
        Ok(())
    }

    #[test]
    fn test_message_mentions_type_and_days() -> Result<()> {
        let now = fixed_now();
        let loans = vec![loan_maturing_in("1", "1", now, 73)];

        let alerts = generate_alerts(
            &loans,
            now,
            &AlertPolicy::default(),
            &AlertHistory::default(),
            1,
        )?;

        assert_eq!(
            alerts[0].message,
            "Term Loan matures in 73 days. Begin refinancing process within next 30 days."
        );
        Ok(())
    }

    #[test]
    fn test_breached_covenant_raises_high_alert() -> Result<()> {
        let now = fixed_now();
        let mut loan = loan_maturing_in("1", "1", now, 900);
        loan.covenant_tests = vec![
            CovenantTest {
                metric: "Debt-to-EBITDA".to_string(),
                bound: CovenantBound::Ceiling,
                threshold: 3.0,
                observed: 3.6,
            },
            dscr_floor(1.4),
        ];

        let alerts = generate_alerts(
            std::slice::from_ref(&loan),
            now,
            &AlertPolicy::default(),
            &AlertHistory::default(),
            1,
        )?;

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::CovenantBreach);
        assert_eq!(alerts[0].priority, AlertPriority::High);
        assert_eq!(alerts[0].covenant_metric.as_deref(), Some("Debt-to-EBITDA"));
        assert!(alerts[0].message.starts_with("Debt-to-EBITDA covenant breached"));
        Ok(())
    }

    #[test]
    fn test_history_skips_each_alert_kind_independently() -> Result<()> {
        let now = fixed_now();
        let mut warned = loan_maturing_in("1", "1", now, 40);
        warned.alert_sent = true;
        warned.covenant_tests = vec![dscr_floor(1.1)];
        let mut breached = loan_maturing_in("2", "1", now, 40);
        breached.covenant_tests = vec![dscr_floor(1.1)];
        let loans = vec![warned, breached];

        let mut on_file = create_test_alert("7", "2", "1", AlertPriority::High);
        on_file.alert_type = AlertType::CovenantBreach;
        on_file.covenant_metric = Some("DSCR".to_string());
        let existing = vec![on_file];
        let history = AlertHistory::new(&loans, &existing);
        assert_eq!(history.warned_loans, HashSet::from(["1"]));

        let alerts = generate_alerts(&loans, now, &AlertPolicy::default(), &history, 8)?;

        let raised: Vec<(&str, AlertType)> = alerts
            .iter()
            .map(|a| (a.loan_id.as_str(), a.alert_type))
            .collect();
        assert_eq!(
            raised,
            vec![
                ("1", AlertType::CovenantBreach),
                ("2", AlertType::MaturityWarning),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_warning_on_file_counts_as_warned() {
        let now = fixed_now();
        let loans = vec![loan_maturing_in("1", "1", now, 40)];
        let existing = vec![create_test_alert("4", "1", "1", AlertPriority::Medium)];

        let history = AlertHistory::new(&loans, &existing);

        assert!(history.is_warned(&loans[0]));
        assert!(history.breaches.is_empty());
    }

    #[test]
    fn test_ids_stop_at_u64_max() -> Result<()> {
        let now = fixed_now();
        let policy = AlertPolicy::default();
        let history = AlertHistory::default();

        let one = vec![loan_maturing_in("1", "1", now, 10)];
        let alerts = generate_alerts(&one, now, &policy, &history, u64::MAX)?;
        assert_eq!(alerts[0].id, u64::MAX.to_string());

        let two = vec![
            loan_maturing_in("1", "1", now, 10),
            loan_maturing_in("2", "1", now, 20),
        ];
        let result = generate_alerts(&two, now, &policy, &history, u64::MAX);
        assert!(matches!(result, Err(Error::AlertIdsExhausted { .. })));
        Ok(())
    }

    #[test]
    fn test_maturity_warning_priority_rises_as_maturity_nears() -> Result<()> {
        let now = fixed_now();
        let policy = AlertPolicy::default();
        let loan = loan_maturing_in("1", "1", now, 170);
        let alerts = generate_alerts(
            std::slice::from_ref(&loan),
            now,
            &policy,
            &AlertHistory::default(),
            1,
        )?;
        assert_eq!(alerts[0].priority, AlertPriority::Low);

        let later = now + Duration::days(165);
        let row = AlertRow::resolve(&alerts[0], Some(&loan), None, later, &policy);

        assert_eq!(row.days_until_maturity, Some(5));
        assert_eq!(row.priority, AlertPriority::Critical);
        assert_eq!(row.alert.priority, AlertPriority::Low);
        Ok(())
    }

    #[test]
    fn test_non_maturity_alerts_keep_raised_priority() {
        let now = fixed_now();
        let policy = AlertPolicy::default();
        let loan = loan_maturing_in("1", "1", now, 5);
        let mut review = create_test_alert("1", "1", "1", AlertPriority::Low);
        review.alert_type = AlertType::RateReview;

        let row = AlertRow::resolve(&review, Some(&loan), None, now, &policy);

        assert_eq!(row.priority, AlertPriority::Low);
    }

    #[test]
    fn test_alert_row_placeholders_for_missing_references() {
        let now = fixed_now();
        let policy = AlertPolicy::default();
        let alert = create_test_alert("1", "99", "42", AlertPriority::High);

        let row = AlertRow::resolve(&alert, None, None, now, &policy);

        assert_eq!(row.days_until_maturity, None);
        assert_eq!(row.company_name, None);
        assert_eq!(row.loan_label, None);
        assert_eq!(row.priority, AlertPriority::High);

        let loan = loan_maturing_in("99", "42", now, 57);
        let company = create_test_company("42", "HealthTech Innovations");
        let row = AlertRow::resolve(&alert, Some(&loan), Some(&company), now, &policy);
        assert_eq!(row.days_until_maturity, Some(57));
        assert_eq!(row.company_name.as_deref(), Some("HealthTech Innovations"));
        assert_eq!(row.loan_label.as_deref(), Some("Term Loan • Test Bank"));
    }
}
