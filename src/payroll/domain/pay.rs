//! Salary and discretionary bonus of one staff member.

use super::PayrollDomainError;
use crate::config::SettlementPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pay inputs of one staff member for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayData {
    salary: Option<Decimal>,
    bonus: Decimal,
}

/// Edit of a staff member's pay inputs; absent fields are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayChange {
    /// New monthly salary.
    pub salary: Option<Decimal>,
    /// New discretionary bonus.
    pub bonus: Option<Decimal>,
}

impl PayData {
    /// Creates validated pay inputs.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError::NegativeAmount`] for negative values.
    pub fn new(salary: Option<Decimal>, bonus: Decimal) -> Result<Self, PayrollDomainError> {
        if salary.is_some_and(|value| value.is_sign_negative() && !value.is_zero()) {
            return Err(PayrollDomainError::NegativeAmount("salary"));
        }
        if bonus.is_sign_negative() && !bonus.is_zero() {
            return Err(PayrollDomainError::NegativeAmount("bonus"));
        }
        Ok(Self { salary, bonus })
    }

    /// Returns the stored salary, if any.
    #[must_use]
    pub const fn salary(&self) -> Option<Decimal> {
        self.salary
    }

    /// Returns the salary used for pay, falling back to the policy default
    /// when none or zero is stored.
    #[must_use]
    pub fn effective_salary(&self, policy: &SettlementPolicy) -> Decimal {
        self.salary
            .filter(|salary| !salary.is_zero())
            .unwrap_or(policy.default_salary)
    }

    /// Returns the discretionary bonus.
    #[must_use]
    pub const fn custom_bonus(&self) -> Decimal {
        self.bonus
    }

    /// Returns a copy with `change` applied.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError::NegativeAmount`] for negative values.
    pub fn apply(self, change: PayChange) -> Result<Self, PayrollDomainError> {
        Self::new(
            change.salary.or(self.salary),
            change.bonus.unwrap_or(self.bonus),
        )
    }
}
