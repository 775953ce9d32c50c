//! Payroll calendar month.

use super::PayrollDomainError;
use crate::config::SettlementPolicy;
use crate::task::domain::BonusMonth;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use std::fmt;

/// The (year, month) a timesheet and its payouts cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollPeriod {
    year: i32,
    month: u32,
    first_day: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError::InvalidPeriod`] when the month does not
    /// exist.
    pub fn new(year: i32, month: u32) -> Result<Self, PayrollDomainError> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(PayrollDomainError::InvalidPeriod { year, month })?;
        Ok(Self {
            year,
            month,
            first_day,
        })
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month number, 1 to 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the bonus month engineers are paid for in this period.
    #[must_use]
    pub fn bonus_month(self) -> BonusMonth {
        BonusMonth::of(self.first_day)
    }

    /// Returns every date of the period in order.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        self.first_day
            .iter_days()
            .take_while(move |date| date.month() == self.month)
    }

    /// Returns the number of days in the period.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.dates().last().map_or(0, |date| date.day())
    }

    /// Returns the date of `day`, when the period has one.
    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Returns the number of Monday-to-Friday days.
    #[must_use]
    pub fn work_days(self) -> u32 {
        let count = self.dates().filter(|date| !is_weekend(*date)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Returns the nominal working hours of the period.
    #[must_use]
    pub fn work_hours(self, policy: &SettlementPolicy) -> Decimal {
        Decimal::from(self.work_days()).saturating_mul(policy.standard_day_hours)
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

/// Returns whether `date` falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
