//! Settlement policy configuration.
//!
//! Every constant the settlement rules depend on lives in
//! [`SettlementPolicy`] so that computation sites never re-derive them. The
//! defaults reproduce the production policy; deployments may override any
//! field through `SETTLEMENT_*` environment variables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

/// Monthly base salary used when a user has no (or a zero) salary entry.
pub const DEFAULT_SALARY: Decimal = dec!(25000);

/// Share of a task's work price paid out as the engineers' bonus pool.
pub const DEFAULT_BONUS_SHARE: Decimal = dec!(0.25);

/// Multiplier applied to the nominal hourly rate for overtime and weekends.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = dec!(2);

/// Hours in a standard working day.
pub const DEFAULT_STANDARD_DAY_HOURS: Decimal = dec!(8);

/// Day of month from which late approvals roll the bonus stamp forward.
pub const DEFAULT_STAMP_CUTOFF_DAY: u32 = 16;

/// Comment written when the accountant approves without leaving one.
pub const DEFAULT_ACCOUNTANT_APPROVAL_NOTE: &str = "Погоджено, претензій не маю.";

/// Environment variable prefix used by [`SettlementPolicy::from_env`].
pub const ENV_PREFIX: &str = "SETTLEMENT_";

/// Errors raised while loading or validating a settlement policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("failed to read settlement policy from environment: {0}")]
    Environment(#[from] envy::Error),

    /// A policy field holds a value the settlement rules cannot use.
    #[error("invalid settlement policy field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Constants governing bonus and payroll computation.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tasksettle::config::SettlementPolicy;
///
/// let policy = SettlementPolicy::default();
/// assert_eq!(policy.default_salary, dec!(25000));
/// assert_eq!(policy.stamp_cutoff_day, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettlementPolicy {
    /// Salary applied when pay data carries none.
    pub default_salary: Decimal,
    /// Fraction of the work price forming the bonus pool.
    pub bonus_share: Decimal,
    /// Overtime and weekend rate multiplier.
    pub overtime_multiplier: Decimal,
    /// Hours per standard working day.
    pub standard_day_hours: Decimal,
    /// First day of month on which the bonus stamp rolls forward.
    pub stamp_cutoff_day: u32,
    /// Canned accountant approval comment.
    pub accountant_approval_note: String,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            default_salary: DEFAULT_SALARY,
            bonus_share: DEFAULT_BONUS_SHARE,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            standard_day_hours: DEFAULT_STANDARD_DAY_HOURS,
            stamp_cutoff_day: DEFAULT_STAMP_CUTOFF_DAY,
            accountant_approval_note: DEFAULT_ACCOUNTANT_APPROVAL_NOTE.to_owned(),
        }
    }
}

impl SettlementPolicy {
    /// Loads the policy from `SETTLEMENT_*` environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when a variable cannot be parsed
    /// and [`ConfigError::InvalidField`] when a parsed value is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case outside development.
        if dotenv::dotenv().is_err() {
            tracing::debug!("no .env file found; using process environment only");
        }
        let policy: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        policy.validate()?;
        tracing::info!(
            default_salary = %policy.default_salary,
            bonus_share = %policy.bonus_share,
            cutoff_day = policy.stamp_cutoff_day,
            "loaded settlement policy"
        );
        Ok(policy)
    }

    /// Checks that every field is usable by the settlement rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for the first unusable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=31).contains(&self.stamp_cutoff_day) {
            return Err(ConfigError::InvalidField {
                field: "stamp_cutoff_day",
                reason: "must be a day of month between 1 and 31",
            });
        }
        if self.standard_day_hours <= Decimal::ZERO {
            return Err(ConfigError::InvalidField {
                field: "standard_day_hours",
                reason: "must be positive",
            });
        }
        if self.overtime_multiplier <= Decimal::ZERO {
            return Err(ConfigError::InvalidField {
                field: "overtime_multiplier",
                reason: "must be positive",
            });
        }
        if self.bonus_share < Decimal::ZERO || self.bonus_share > Decimal::ONE {
            return Err(ConfigError::InvalidField {
                field: "bonus_share",
                reason: "must lie between 0 and 1",
            });
        }
        if self.default_salary < Decimal::ZERO {
            return Err(ConfigError::InvalidField {
                field: "default_salary",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
