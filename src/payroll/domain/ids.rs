//! Identifier types for payroll subjects.

use super::PayrollDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Region bucket for staff without an assigned region.
pub const UNASSIGNED_REGION: &str = "Без регіону";

/// Identifier of a staff member, as issued by user administration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollDomainError::EmptyUserId`] when `value` is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, PayrollDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PayrollDomainError::EmptyUserId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a service region, or the unassigned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionName(String);

impl RegionName {
    /// Creates a region name; blank input maps to the unassigned bucket.
    #[must_use]
    pub fn new(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::unassigned()
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// Creates a region name from an optional assignment.
    #[must_use]
    pub fn from_assignment(value: Option<&str>) -> Self {
        value.map_or_else(Self::unassigned, Self::new)
    }

    /// Returns the bucket for staff without a region.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(UNASSIGNED_REGION.to_owned())
    }

    /// Returns whether this is the unassigned bucket.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0 == UNASSIGNED_REGION
    }

    /// Returns the region text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
