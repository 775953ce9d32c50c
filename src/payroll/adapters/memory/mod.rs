//! In-memory adapters.

mod timesheet;

pub use timesheet::InMemoryTimesheetRepository;
