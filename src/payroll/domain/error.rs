//! Error types for payroll domain validation.

use thiserror::Error;

/// Errors returned while constructing payroll values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayrollDomainError {
    /// A month number outside `1..=12` or an unrepresentable year.
    #[error("invalid payroll period {month:02}-{year}")]
    InvalidPeriod {
        /// Calendar year.
        year: i32,
        /// Month number as supplied.
        month: u32,
    },

    /// A day that does not exist in the period.
    #[error("day {day} is outside a month of {days_in_month} days")]
    DayOutOfRange {
        /// Day as supplied.
        day: u32,
        /// Days in the period.
        days_in_month: u32,
    },

    /// Negative hours were entered for a day.
    #[error("hours for day {0} cannot be negative")]
    NegativeHours(u32),

    /// A negative salary or bonus was entered.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// A user identifier was blank.
    #[error("user identifier must not be empty")]
    EmptyUserId,
}
