//! Repository port for regional timesheets and pay data.

use crate::payroll::domain::{PayrollPeriod, RegionName, RegionSheet};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for timesheet repository operations.
pub type TimesheetRepositoryResult<T> = Result<T, TimesheetRepositoryError>;

/// Timesheet persistence contract, keyed by (region, period, user).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimesheetRepository: Send + Sync {
    /// Loads the stored rows of a region for a period.
    ///
    /// Returns an empty sheet when nothing is stored.
    async fn load(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
    ) -> TimesheetRepositoryResult<RegionSheet>;

    /// Commits a region batch.
    ///
    /// Each user row in `batch` replaces the stored row for that user; rows
    /// of users absent from the batch are left untouched.
    async fn save_batch(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
        batch: RegionSheet,
    ) -> TimesheetRepositoryResult<()>;
}

/// Errors returned by timesheet repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TimesheetRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TimesheetRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
