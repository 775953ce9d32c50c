//! Timesheet and pay data of one region for one period.

use super::{PayData, TimesheetEntry, UserId};
use std::collections::BTreeMap;

/// Per-user timesheet rows and pay data of a region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSheet {
    /// Timesheet rows keyed by user.
    pub hours: BTreeMap<UserId, TimesheetEntry>,
    /// Pay data keyed by user.
    pub pay: BTreeMap<UserId, PayData>,
}

impl RegionSheet {
    /// Returns whether the sheet holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty() && self.pay.is_empty()
    }

    /// Overwrites this sheet's rows with those of `batch`, keeping rows the
    /// batch does not mention.
    pub fn merge(&mut self, batch: Self) {
        self.hours.extend(batch.hours);
        self.pay.extend(batch.pay);
    }

    /// Returns the pay data of `user`, defaulting when absent.
    #[must_use]
    pub fn pay_for(&self, user: &UserId) -> PayData {
        self.pay.get(user).copied().unwrap_or_default()
    }
}
