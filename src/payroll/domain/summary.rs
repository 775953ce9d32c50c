//! Payout computation for one staff member.

use super::{PayData, PayrollPeriod, TimesheetEntry};
use crate::config::SettlementPolicy;
use rust_decimal::{Decimal, RoundingStrategy};

/// Payout of one staff member for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollSummary {
    /// Total hours on the timesheet.
    pub total_hours: Decimal,
    /// Salary used for the computation.
    pub salary: Decimal,
    /// Weekday hours up to the standard day.
    pub normal_hours: Decimal,
    /// Weekday hours beyond the standard day.
    pub overtime: Decimal,
    /// Hourly rate for overtime and weekend hours.
    pub overtime_rate: Decimal,
    /// Overtime payout.
    pub overtime_pay: Decimal,
    /// Salary prorated by normal hours, rounded to whole units.
    pub base_pay: Decimal,
    /// Discretionary bonus.
    pub custom_bonus: Decimal,
    /// Engineer bonus from completed tasks.
    pub engineer_bonus: Decimal,
    /// Weekend hours.
    pub weekend_hours: Decimal,
    /// Weekend payout.
    pub weekend_pay: Decimal,
    /// Sum of every payout component.
    pub total_pay: Decimal,
}

/// Computes a staff member's payout.
///
/// A period without working hours yields a zero rate and zero base pay.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tasksettle::config::SettlementPolicy;
/// use tasksettle::payroll::domain::{PayData, PayrollPeriod, TimesheetEntry, compute_pay};
///
/// let policy = SettlementPolicy::default();
/// let period = PayrollPeriod::new(2024, 4).expect("valid period");
/// let entry = TimesheetEntry::weekday_default(period, &policy);
/// let summary = compute_pay(&entry, &PayData::default(), dec!(0), period, &policy);
/// assert_eq!(summary.base_pay, dec!(25000));
/// assert_eq!(summary.total_pay, dec!(25000));
/// ```
#[must_use]
pub fn compute_pay(
    entry: &TimesheetEntry,
    pay: &PayData,
    engineer_bonus: Decimal,
    period: PayrollPeriod,
    policy: &SettlementPolicy,
) -> PayrollSummary {
    let salary = pay.effective_salary(policy);
    let work_hours = period.work_hours(policy);
    let hours = entry.breakdown(period, policy);

    let overtime_rate = salary
        .checked_div(work_hours)
        .map_or(Decimal::ZERO, |hourly| {
            hourly.saturating_mul(policy.overtime_multiplier)
        });
    let base_pay = salary
        .saturating_mul(hours.normal.min(work_hours))
        .checked_div(work_hours)
        .map_or(Decimal::ZERO, |prorated| {
            prorated.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        });
    let overtime_pay = hours.overtime.saturating_mul(overtime_rate);
    let weekend_pay = hours.weekend.saturating_mul(overtime_rate);
    let custom_bonus = pay.custom_bonus();

    let total_pay = [base_pay, overtime_pay, custom_bonus, engineer_bonus, weekend_pay]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add);

    PayrollSummary {
        total_hours: entry.total(),
        salary,
        normal_hours: hours.normal,
        overtime: hours.overtime,
        overtime_rate,
        overtime_pay,
        base_pay,
        custom_bonus,
        engineer_bonus,
        weekend_hours: hours.weekend,
        weekend_pay,
        total_pay,
    }
}
