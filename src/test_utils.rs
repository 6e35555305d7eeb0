//! Shared test utilities for the loan maturity tracker.
//!
//! This module provides a fixed reference time and helpers for creating test entities with
//! sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::entities::{Alert, AlertPriority, AlertType, Company, ContactInfo, Loan};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Reference time used across tests: midnight UTC on 2 January 2025.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()
}

/// Creates a test company with sensible defaults.
///
/// # Defaults
/// * `industry`: "Technology"
/// * `location`: "San Francisco, CA"
/// * `created_at`: [`fixed_now`]
pub fn create_test_company(id: &str, name: &str) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        industry: "Technology".to_string(),
        location: "San Francisco, CA".to_string(),
        revenue: 100_000_000.0,
        employees: 250,
        website: "https://example.com".to_string(),
        contact_info: ContactInfo {
            name: "Test Contact".to_string(),
            title: "CFO".to_string(),
            email: "cfo@example.com".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
        },
        notes: String::new(),
        created_at: fixed_now(),
    }
}

/// Creates a test loan with sensible defaults.
///
/// # Defaults
/// * `loan_type`: "Term Loan"
/// * `amount`: 10,000,000
/// * `lender`: "Test Bank"
/// * `interest_rate`: 5.0
/// * `maturity_date`: 2026-06-30, originated three years earlier
pub fn create_test_loan(id: &str, company_id: &str) -> Loan {
    Loan {
        id: id.to_string(),
        company_id: company_id.to_string(),
        loan_type: "Term Loan".to_string(),
        amount: 10_000_000.0,
        currency: "USD".to_string(),
        lender: "Test Bank".to_string(),
        origination_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        maturity_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        interest_rate: 5.0,
        covenants: String::new(),
        covenant_tests: Vec::new(),
        alert_sent: false,
        notes: String::new(),
    }
}

/// Creates a test loan maturing `days` after `now` (negative for the past).
pub fn loan_maturing_in(id: &str, company_id: &str, now: DateTime<Utc>, days: i64) -> Loan {
    let maturity_date = (now + Duration::days(days)).date_naive();
    Loan {
        maturity_date,
        origination_date: maturity_date - Duration::days(3 * 365),
        ..create_test_loan(id, company_id)
    }
}

/// Creates a maturity-warning alert with the given priority.
pub fn create_test_alert(
    id: &str,
    loan_id: &str,
    company_id: &str,
    priority: AlertPriority,
) -> Alert {
    Alert {
        id: id.to_string(),
        loan_id: loan_id.to_string(),
        company_id: company_id.to_string(),
        alert_type: AlertType::MaturityWarning,
        priority,
        message: "Test alert".to_string(),
        created_at: fixed_now(),
        dismissed: false,
        covenant_metric: None,
    }
}
