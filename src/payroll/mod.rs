//! Regional timesheets and payroll.
//!
//! Combines a region's daily-hours timesheet, per-user pay data and the
//! engineer bonus ledger into a payout per staff member, laid out in the
//! same hexagonal shape as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
