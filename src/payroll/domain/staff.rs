//! Roster entries supplied for a payroll report.

use super::{RegionName, UserId};

/// A staff member as known to user administration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    id: UserId,
    name: String,
    region: RegionName,
}

impl StaffMember {
    /// Creates a roster entry; a missing region maps to the unassigned
    /// bucket.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            id,
            name: name.into().trim().to_owned(),
            region: RegionName::from_assignment(region),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name used to match engineer slots.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the region the member is paid in.
    #[must_use]
    pub const fn region(&self) -> &RegionName {
        &self.region
    }
}
