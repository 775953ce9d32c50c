//! Domain model for regional payroll.
//!
//! Timesheets record hours per day; pay data records salary and a
//! discretionary bonus. Both are keyed by (region, period, user) and combine
//! with engineer bonuses into a payout per staff member.

mod error;
mod ids;
mod pay;
mod period;
mod sheet;
mod staff;
mod summary;
mod timesheet;

pub use error::PayrollDomainError;
pub use ids::{RegionName, UNASSIGNED_REGION, UserId};
pub use pay::{PayChange, PayData};
pub use period::{PayrollPeriod, is_weekend};
pub use sheet::RegionSheet;
pub use staff::StaffMember;
pub use summary::{PayrollSummary, compute_pay};
pub use timesheet::{HoursBreakdown, TimesheetEntry};
