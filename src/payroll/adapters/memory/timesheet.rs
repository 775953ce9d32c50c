//! In-memory timesheet repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::payroll::{
    domain::{PayrollPeriod, RegionName, RegionSheet},
    ports::{TimesheetRepository, TimesheetRepositoryError, TimesheetRepositoryResult},
};

type SheetKey = (RegionName, i32, u32);

/// Thread-safe in-memory timesheet repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimesheetRepository {
    sheets: Arc<RwLock<HashMap<SheetKey, RegionSheet>>>,
}

impl InMemoryTimesheetRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(region: &RegionName, period: PayrollPeriod) -> SheetKey {
    (region.clone(), period.year(), period.month())
}

fn lock_error(err: impl std::fmt::Display) -> TimesheetRepositoryError {
    TimesheetRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TimesheetRepository for InMemoryTimesheetRepository {
    async fn load(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
    ) -> TimesheetRepositoryResult<RegionSheet> {
        let sheets = self.sheets.read().map_err(lock_error)?;
        Ok(sheets.get(&key(region, period)).cloned().unwrap_or_default())
    }

    async fn save_batch(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
        batch: RegionSheet,
    ) -> TimesheetRepositoryResult<()> {
        let mut sheets = self.sheets.write().map_err(lock_error)?;
        sheets.entry(key(region, period)).or_default().merge(batch);
        Ok(())
    }
}
