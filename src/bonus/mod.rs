//! Engineer bonus allocation.
//!
//! Completed, fully approved tasks are dated into a bonus month and their
//! bonus pool is split evenly across the credited engineers. Results are
//! recomputed from the task list on every request.

mod allocator;
mod details;
mod resolver;

pub use allocator::{BonusLedger, SkippedTask, engineer_bonus};
pub use details::{RegionWorkDetails, WorkDetailRow, WorkDetailTotals};
pub use resolver::{credits_engineer, same_engineer};

#[cfg(test)]
mod tests;
