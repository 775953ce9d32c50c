//! Daily hours of one staff member for one period.

use super::{PayrollDomainError, PayrollPeriod, is_weekend};
use crate::config::SettlementPolicy;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hours worked per day of month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    hours: BTreeMap<u32, Decimal>,
}

/// Hours of an entry split by pay rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoursBreakdown {
    /// Weekday hours up to the standard day.
    pub normal: Decimal,
    /// Weekday hours beyond the standard day.
    pub overtime: Decimal,
    /// Hours on Saturdays and Sundays.
    pub weekend: Decimal,
}

impl TimesheetEntry {
    /// Synthesises the default sheet: a standard day on weekdays, nothing on
    /// weekends.
    #[must_use]
    pub fn weekday_default(period: PayrollPeriod, policy: &SettlementPolicy) -> Self {
        let hours = period
            .dates()
            .map(|date| {
                let day_hours = if is_weekend(date) {
                    Decimal::ZERO
                } else {
                    policy.standard_day_hours
                };
                (date.day(), day_hours)
            })
            .collect();
        Self { hours }
    }

    /// Builds an entry from stored per-day hours.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError`] when a day is outside the period or
    /// holds negative hours.
    pub fn from_days(
        period: PayrollPeriod,
        days: impl IntoIterator<Item = (u32, Decimal)>,
    ) -> Result<Self, PayrollDomainError> {
        let mut entry = Self::default();
        for (day, hours) in days {
            entry.set_hours(period, day, hours)?;
        }
        Ok(entry)
    }

    /// Sets the hours of one day.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError::DayOutOfRange`] for days the period
    /// lacks and [`PayrollDomainError::NegativeHours`] for negative input.
    pub fn set_hours(
        &mut self,
        period: PayrollPeriod,
        day: u32,
        hours: Decimal,
    ) -> Result<(), PayrollDomainError> {
        if period.date(day).is_none() {
            return Err(PayrollDomainError::DayOutOfRange {
                day,
                days_in_month: period.days_in_month(),
            });
        }
        if hours.is_sign_negative() && !hours.is_zero() {
            return Err(PayrollDomainError::NegativeHours(day));
        }
        self.hours.insert(day, hours);
        Ok(())
    }

    /// Returns the hours recorded for `day`, zero when absent.
    #[must_use]
    pub fn hours(&self, day: u32) -> Decimal {
        self.hours.get(&day).copied().unwrap_or_default()
    }

    /// Returns every recorded (day, hours) pair in day order.
    pub fn days(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.hours.iter().map(|(day, hours)| (*day, *hours))
    }

    /// Returns the total hours of the entry.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.hours
            .values()
            .copied()
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Splits the hours into normal, overtime and weekend hours.
    #[must_use]
    pub fn breakdown(&self, period: PayrollPeriod, policy: &SettlementPolicy) -> HoursBreakdown {
        let standard = policy.standard_day_hours;
        period
            .dates()
            .fold(HoursBreakdown::default(), |acc, date| {
                let worked = self.hours(date.day());
                if is_weekend(date) {
                    HoursBreakdown {
                        weekend: acc.weekend.saturating_add(worked),
                        ..acc
                    }
                } else {
                    let excess = worked.saturating_sub(standard).max(Decimal::ZERO);
                    HoursBreakdown {
                        normal: acc.normal.saturating_add(worked.min(standard)),
                        overtime: acc.overtime.saturating_add(excess),
                        ..acc
                    }
                }
            })
    }
}
