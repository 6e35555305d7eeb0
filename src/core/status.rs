//! Loan status derivation.
//!
//! Status is a pure function of the maturity date and a reference time. Nothing here reads
//! the system clock: callers take one `now` per evaluation pass and hand it to every call, so
//! all loans in one query are classified against the same instant.

use crate::entities::{Loan, LoanStatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Loans due within this many days (inclusive) are `Maturing Soon`.
pub const MATURING_SOON_DAYS: i64 = 30;
/// Loans due within this many days (inclusive) are at least `Upcoming`.
pub const UPCOMING_DAYS: i64 = 180;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A loan together with its fields derived against a reference time.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLoan {
    pub loan: Loan,
    pub status: LoanStatus,
    pub days_until_maturity: i64,
}

/// Calendar days from `now` until `maturity`, rounding any partial day up.
///
/// The maturity date is taken at 00:00 UTC. A loan maturing today at midnight evaluated later
/// that day gives `0`; one maturing tomorrow evaluated mid-afternoon today gives `1`.
#[must_use]
pub fn days_until_maturity(maturity: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = maturity.and_time(NaiveTime::MIN).and_utc();
    let millis = (due - now).num_milliseconds();
    // Integer division truncates toward zero, which is already the ceiling for negatives.
    let whole_days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        whole_days + 1
    } else {
        whole_days
    }
}

/// Classifies a day count into a lifecycle status.
#[must_use]
pub const fn status_for_days(days: i64) -> LoanStatus {
    if days < 0 {
        LoanStatus::Matured
    } else if days <= MATURING_SOON_DAYS {
        LoanStatus::MaturingSoon
    } else if days <= UPCOMING_DAYS {
        LoanStatus::Upcoming
    } else {
        LoanStatus::Active
    }
}

/// Derives the lifecycle status of a loan maturing on `maturity`, evaluated at `now`.
#[must_use]
pub fn derive_status(maturity: NaiveDate, now: DateTime<Utc>) -> LoanStatus {
    status_for_days(days_until_maturity(maturity, now))
}

/// Attaches status and days-until-maturity to a single loan.
#[must_use]
pub fn derive_loan(loan: &Loan, now: DateTime<Utc>) -> DerivedLoan {
    let days_until_maturity = days_until_maturity(loan.maturity_date, now);
    DerivedLoan {
        loan: loan.clone(),
        status: status_for_days(days_until_maturity),
        days_until_maturity,
    }
}

/// Derives every loan in `loans` against the same `now`.
pub fn derive_loans<'a, I>(loans: I, now: DateTime<Utc>) -> Vec<DerivedLoan>
where
    I: IntoIterator<Item = &'a Loan>,
{
    loans.into_iter().map(|loan| derive_loan(loan, now)).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_boundaries_are_exact() {
        assert_eq!(status_for_days(-1), LoanStatus::Matured);
        assert_eq!(status_for_days(0), LoanStatus::MaturingSoon);
        assert_eq!(status_for_days(30), LoanStatus::MaturingSoon);
        assert_eq!(status_for_days(31), LoanStatus::Upcoming);
        assert_eq!(status_for_days(180), LoanStatus::Upcoming);
        assert_eq!(status_for_days(181), LoanStatus::Active);
    }

    #[test]
    fn test_status_is_monotonic_in_days() {
        let mut previous = status_for_days(-400).urgency_rank();
        for days in -399..=400 {
            let rank = status_for_days(days).urgency_rank();
            assert!(rank <= previous, "urgency rose at {days} days");
            previous = rank;
        }
    }

    #[test]
    fn test_partial_days_round_up() {
        let maturity = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let midnight = Utc.with_ymd_and_hms(2025, 1, 14, 0, 0, 0).unwrap();
        assert_eq!(days_until_maturity(maturity, midnight), 1);

        let afternoon = Utc.with_ymd_and_hms(2025, 1, 14, 15, 30, 0).unwrap();
        assert_eq!(days_until_maturity(maturity, afternoon), 1);

        let same_day = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        assert_eq!(days_until_maturity(maturity, same_day), 0);
        assert_eq!(derive_status(maturity, same_day), LoanStatus::MaturingSoon);

        let next_day = Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap();
        assert_eq!(days_until_maturity(maturity, next_day), -1);
        assert_eq!(derive_status(maturity, next_day), LoanStatus::Matured);
    }

    #[test]
    fn test_example_scenarios() {
        let now = fixed_now();
        let in_73 = (now + Duration::days(73)).date_naive();
        let in_13 = (now + Duration::days(13)).date_naive();
        let ago_10 = (now - Duration::days(10)).date_naive();

        assert_eq!(days_until_maturity(in_73, now), 73);
        assert_eq!(derive_status(in_73, now), LoanStatus::Upcoming);
        assert_eq!(derive_status(in_13, now), LoanStatus::MaturingSoon);
        assert_eq!(days_until_maturity(ago_10, now), -10);
        assert_eq!(derive_status(ago_10, now), LoanStatus::Matured);
    }

    #[test]
    fn test_derive_loans_uses_one_reference_time() {
        let now = fixed_now();
        let loans = vec![
            loan_maturing_in("1", "1", now, 200),
            loan_maturing_in("2", "1", now, 90),
            loan_maturing_in("3", "1", now, -5),
        ];

        let derived = derive_loans(&loans, now);
        let statuses: Vec<LoanStatus> = derived.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![LoanStatus::Active, LoanStatus::Upcoming, LoanStatus::Matured]
        );
        assert_eq!(derived[1].days_until_maturity, 90);
        assert_eq!(derived[2].loan.id, "3");
    }
}
