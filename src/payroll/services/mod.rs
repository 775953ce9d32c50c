//! Application services for regional payroll.

mod payroll;

pub use payroll::{PayrollError, PayrollReport, PayrollResult, PayrollRow, PayrollService};
