//! Port contracts for regional payroll.

pub mod timesheet;

#[cfg(test)]
pub use timesheet::MockTimesheetRepository;
pub use timesheet::{TimesheetRepository, TimesheetRepositoryError, TimesheetRepositoryResult};
