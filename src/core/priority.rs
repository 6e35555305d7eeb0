//! Alert priority classification.
//!
//! Priority tiers come from an [`AlertPolicy`] rather than constants so deployments can tune
//! them from `config.toml`. Fewer days remaining means higher priority, and expensive or
//! short-dated facilities (bridge and mezzanine debt, high coupons) are escalated one tier.

use crate::{
    entities::{AlertPriority, AlertType, Loan},
    errors::{Error, Result},
};
use serde::Deserialize;

/// Thresholds and escalation rules used to assign alert priorities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Maturity within this many days is Critical
    pub critical_within_days: i64,
    /// Maturity within this many days is High
    pub high_within_days: i64,
    /// Maturity within this many days is Medium; anything later is Low
    pub medium_within_days: i64,
    /// Interest rate (percent) at or above which a loan escalates one tier
    pub escalation_rate: f64,
    /// Loan types that always escalate one tier
    pub escalating_loan_types: Vec<String>,
    /// Maturity warnings are generated for loans due within this many days
    pub warning_horizon_days: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            critical_within_days: 15,
            high_within_days: 60,
            medium_within_days: 120,
            escalation_rate: 10.0,
            escalating_loan_types: vec!["Bridge Loan".to_string(), "Mezzanine Debt".to_string()],
            warning_horizon_days: 180,
        }
    }
}

impl AlertPolicy {
    /// Checks that the day thresholds are non-negative and strictly ascending.
    ///
    /// # Errors
    /// Returns `Error::Config` when the thresholds overlap or are out of order.
    pub fn validate(&self) -> Result<()> {
        let ascending = 0 <= self.critical_within_days
            && self.critical_within_days < self.high_within_days
            && self.high_within_days < self.medium_within_days;
        if !ascending {
            return Err(Error::Config {
                message: format!(
                    "alert_policy thresholds must satisfy 0 <= critical ({}) < high ({}) < medium ({})",
                    self.critical_within_days, self.high_within_days, self.medium_within_days
                ),
            });
        }
        if self.warning_horizon_days < 0 {
            return Err(Error::Config {
                message: "alert_policy.warning_horizon_days cannot be negative".to_string(),
            });
        }
        if !self.escalation_rate.is_finite() || self.escalation_rate < 0.0 {
            return Err(Error::Config {
                message: format!(
                    "alert_policy.escalation_rate must be a non-negative percentage, got {}",
                    self.escalation_rate
                ),
            });
        }
        Ok(())
    }

    /// Whether this loan's risk character escalates its maturity alerts.
    #[must_use]
    pub fn escalates(&self, loan: &Loan) -> bool {
        loan.interest_rate >= self.escalation_rate
            || self
                .escalating_loan_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&loan.loan_type))
    }

    /// Priority for a maturity warning on `loan` with `days` remaining.
    ///
    /// Matured loans are always Critical.
    #[must_use]
    pub fn classify_maturity(&self, loan: &Loan, days: i64) -> AlertPriority {
        if days < 0 {
            return AlertPriority::Critical;
        }

        let tier = if days <= self.critical_within_days {
            AlertPriority::Critical
        } else if days <= self.high_within_days {
            AlertPriority::High
        } else if days <= self.medium_within_days {
            AlertPriority::Medium
        } else {
            AlertPriority::Low
        };

        if self.escalates(loan) {
            tier.escalate()
        } else {
            tier
        }
    }

    /// Priority for an alert of `alert_type` on `loan`.
    ///
    /// Covenant alerts sit at Low unless `breached` is set, in which case they are High.
    /// Rate reviews are informational and always Low.
    #[must_use]
    pub fn classify(
        &self,
        alert_type: AlertType,
        loan: &Loan,
        days: i64,
        breached: bool,
    ) -> AlertPriority {
        match alert_type {
            AlertType::MaturityWarning => self.classify_maturity(loan, days),
            AlertType::CovenantBreach if breached => AlertPriority::High,
            AlertType::CovenantBreach | AlertType::RateReview => AlertPriority::Low,
        }
    }
}

/// Ordinal rank of a priority, Low 1 through Critical 4.
#[must_use]
pub const fn priority_rank(priority: AlertPriority) -> u8 {
    priority.rank()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(AlertPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let policy = AlertPolicy {
            high_within_days: 10,
            ..AlertPolicy::default()
        };
        assert!(matches!(policy.validate(), Err(Error::Config { .. })));

        let policy = AlertPolicy {
            escalation_rate: -1.0,
            ..AlertPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_maturity_tiers_for_plain_term_loan() {
        let policy = AlertPolicy::default();
        let loan = create_test_loan("1", "1");

        assert_eq!(policy.classify_maturity(&loan, 0), AlertPriority::Critical);
        assert_eq!(policy.classify_maturity(&loan, 15), AlertPriority::Critical);
        assert_eq!(policy.classify_maturity(&loan, 16), AlertPriority::High);
        assert_eq!(policy.classify_maturity(&loan, 60), AlertPriority::High);
        assert_eq!(policy.classify_maturity(&loan, 61), AlertPriority::Medium);
        assert_eq!(policy.classify_maturity(&loan, 120), AlertPriority::Medium);
        assert_eq!(policy.classify_maturity(&loan, 121), AlertPriority::Low);
        assert_eq!(policy.classify_maturity(&loan, -3), AlertPriority::Critical);
    }

    #[test]
    fn test_high_rate_and_mezzanine_escalate() {
        let policy = AlertPolicy::default();

        let mut mezzanine = create_test_loan("8", "3");
        mezzanine.loan_type = "Mezzanine Debt".to_string();
        assert_eq!(policy.classify_maturity(&mezzanine, 57), AlertPriority::Critical);

        let mut expensive = create_test_loan("9", "3");
        expensive.interest_rate = 12.0;
        assert_eq!(policy.classify_maturity(&expensive, 100), AlertPriority::High);
        assert_eq!(policy.classify_maturity(&expensive, 400), AlertPriority::Medium);
    }

    #[test]
    fn test_covenant_and_rate_review_classification() {
        let policy = AlertPolicy::default();
        let loan = create_test_loan("1", "1");

        assert_eq!(
            policy.classify(AlertType::CovenantBreach, &loan, 5, false),
            AlertPriority::Low
        );
        assert_eq!(
            policy.classify(AlertType::CovenantBreach, &loan, 500, true),
            AlertPriority::High
        );
        assert_eq!(
            policy.classify(AlertType::RateReview, &loan, 5, true),
            AlertPriority::Low
        );
        assert_eq!(
            policy.classify(AlertType::MaturityWarning, &loan, 5, false),
            AlertPriority::Critical
        );
    }

    #[test]
    fn test_priority_rank_is_total() {
        let ranks: Vec<u8> = AlertPriority::ALL.into_iter().map(priority_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
