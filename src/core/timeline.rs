//! Maturity timeline and calendar grouping.
//!
//! Loans are bucketed by the calendar month of their maturity date. Buckets come back in
//! chronological order and loans inside a bucket are ordered by maturity date, with ties
//! keeping their input order.

use crate::core::status::DerivedLoan;
use chrono::{Datelike, Month, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Long label such as "January 2025".
    #[must_use]
    pub fn label(self) -> String {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or_else(
                || self.to_string(),
                |m| format!("{} {}", m.name(), self.year),
            )
    }
}

/// Zero-padded `YYYY-MM`, which sorts the same way as the struct.
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Loans maturing in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MaturityBucket {
    pub period: YearMonth,
    pub loans: Vec<DerivedLoan>,
    pub total_amount: f64,
}

/// Groups loans into month buckets, earliest month first.
#[must_use]
pub fn group_by_maturity_month(loans: &[DerivedLoan]) -> Vec<MaturityBucket> {
    let mut grouped: BTreeMap<YearMonth, Vec<DerivedLoan>> = BTreeMap::new();
    for loan in loans {
        grouped
            .entry(YearMonth::of(loan.loan.maturity_date))
            .or_default()
            .push(loan.clone());
    }

    grouped
        .into_iter()
        .map(|(period, mut loans)| {
            loans.sort_by_key(|l| l.loan.maturity_date);
            let total_amount = loans.iter().map(|l| l.loan.amount).sum();
            MaturityBucket {
                period,
                loans,
                total_amount,
            }
        })
        .collect()
}

/// Loans maturing in `year`/`month`, keyed by day of month, for a calendar grid.
#[must_use]
pub fn calendar_month(
    loans: &[DerivedLoan],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<DerivedLoan>> {
    let target = YearMonth { year, month };
    let mut days: BTreeMap<u32, Vec<DerivedLoan>> = BTreeMap::new();
    for loan in loans
        .iter()
        .filter(|l| YearMonth::of(l.loan.maturity_date) == target)
    {
        days.entry(loan.loan.maturity_date.day())
            .or_default()
            .push(loan.clone());
    }
    days
}
