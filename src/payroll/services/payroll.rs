//! Service layer for timesheet edits and regional payroll reports.

use crate::bonus::{BonusLedger, RegionWorkDetails, SkippedTask};
use crate::config::SettlementPolicy;
use crate::payroll::{
    domain::{
        PayChange, PayData, PayrollDomainError, PayrollPeriod, PayrollSummary, RegionName,
        RegionSheet, StaffMember, TimesheetEntry, compute_pay,
    },
    ports::{TimesheetRepository, TimesheetRepositoryError},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for payroll operations.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PayrollDomainError),
    /// Timesheet repository operation failed.
    #[error(transparent)]
    Timesheets(#[from] TimesheetRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for payroll service operations.
pub type PayrollResult<T> = Result<T, PayrollError>;

/// One staff member's line of a payroll report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRow {
    /// Staff member.
    pub staff: StaffMember,
    /// Hours used for the payout.
    pub timesheet: TimesheetEntry,
    /// Computed payout.
    pub summary: PayrollSummary,
}

/// Payroll of one region for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollReport {
    /// Region covered.
    pub region: RegionName,
    /// Period covered.
    pub period: PayrollPeriod,
    /// Monday-to-Friday days in the period.
    pub work_days: u32,
    /// Nominal working hours in the period.
    pub work_hours: Decimal,
    /// One row per staff member of the region, in roster order.
    pub rows: Vec<PayrollRow>,
    /// Completed work credited to paid staff.
    pub details: RegionWorkDetails,
    /// Tasks left out of bonus allocation for unreadable stamps.
    pub skipped_tasks: Vec<SkippedTask>,
}

impl PayrollReport {
    /// Returns the rows with a positive payout.
    pub fn paid_rows(&self) -> impl Iterator<Item = &PayrollRow> {
        self.rows
            .iter()
            .filter(|row| row.summary.total_pay > Decimal::ZERO)
    }

    /// Returns the sum of every row's payout.
    #[must_use]
    pub fn total_pay(&self) -> Decimal {
        self.rows
            .iter()
            .map(|row| row.summary.total_pay)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Regional payroll orchestration service.
#[derive(Clone)]
pub struct PayrollService<S, T>
where
    S: TimesheetRepository,
    T: TaskRepository,
{
    timesheets: Arc<S>,
    tasks: Arc<T>,
    policy: Arc<SettlementPolicy>,
}

impl<S, T> PayrollService<S, T>
where
    S: TimesheetRepository,
    T: TaskRepository,
{
    /// Creates a service using the default settlement policy.
    #[must_use]
    pub fn new(timesheets: Arc<S>, tasks: Arc<T>) -> Self {
        Self::with_policy(timesheets, tasks, Arc::new(SettlementPolicy::default()))
    }

    /// Creates a service using the given settlement policy.
    #[must_use]
    pub const fn with_policy(
        timesheets: Arc<S>,
        tasks: Arc<T>,
        policy: Arc<SettlementPolicy>,
    ) -> Self {
        Self {
            timesheets,
            tasks,
            policy,
        }
    }

    /// Loads a region's sheet, synthesising default rows for roster members
    /// of the region that have none stored.
    ///
    /// Synthesised rows are returned but not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Timesheets`] when loading fails.
    pub async fn load_timesheet(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
        roster: &[StaffMember],
    ) -> PayrollResult<RegionSheet> {
        let mut sheet = self.timesheets.load(region, period).await?;
        for member in roster.iter().filter(|member| member.region() == region) {
            sheet
                .hours
                .entry(member.id().clone())
                .or_insert_with(|| TimesheetEntry::weekday_default(period, &self.policy));
        }
        Ok(sheet)
    }

    /// Sets one day's hours for a staff member and persists their row.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Domain`] for an invalid day or negative hours
    /// and [`PayrollError::Timesheets`] on persistence failure.
    pub async fn record_hours(
        &self,
        member: &StaffMember,
        period: PayrollPeriod,
        day: u32,
        hours: Decimal,
    ) -> PayrollResult<TimesheetEntry> {
        let stored = self.timesheets.load(member.region(), period).await?;
        let mut entry = stored
            .hours
            .get(member.id())
            .cloned()
            .unwrap_or_else(|| TimesheetEntry::weekday_default(period, &self.policy));
        entry.set_hours(period, day, hours)?;

        let mut batch = RegionSheet::default();
        batch.hours.insert(member.id().clone(), entry.clone());
        self.timesheets
            .save_batch(member.region(), period, batch)
            .await?;
        info!(
            user = %member.id(),
            region = %member.region(),
            %period,
            day,
            %hours,
            total = %entry.total(),
            "recorded timesheet hours"
        );
        Ok(entry)
    }

    /// Updates a staff member's salary or discretionary bonus.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Domain`] for negative amounts and
    /// [`PayrollError::Timesheets`] on persistence failure.
    pub async fn record_pay(
        &self,
        member: &StaffMember,
        period: PayrollPeriod,
        change: PayChange,
    ) -> PayrollResult<PayData> {
        let stored = self.timesheets.load(member.region(), period).await?;
        let pay = stored.pay_for(member.id()).apply(change)?;

        let mut batch = RegionSheet::default();
        batch.pay.insert(member.id().clone(), pay);
        self.timesheets
            .save_batch(member.region(), period, batch)
            .await?;
        info!(user = %member.id(), region = %member.region(), %period, "recorded pay data");
        Ok(pay)
    }

    /// Persists edited rows of a multi-region roster, one batch per region.
    ///
    /// Rows are grouped by each member's region; rows of users missing from
    /// `roster` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Timesheets`] when a batch fails to persist.
    /// Batches committed before the failure stay committed.
    pub async fn save_roster_batch(
        &self,
        period: PayrollPeriod,
        roster: &[StaffMember],
        edits: RegionSheet,
    ) -> PayrollResult<()> {
        let mut batches: BTreeMap<RegionName, RegionSheet> = BTreeMap::new();
        let RegionSheet { mut hours, mut pay } = edits;
        for member in roster {
            let batch = batches.entry(member.region().clone()).or_default();
            if let Some(entry) = hours.remove(member.id()) {
                batch.hours.insert(member.id().clone(), entry);
            }
            if let Some(data) = pay.remove(member.id()) {
                batch.pay.insert(member.id().clone(), data);
            }
        }
        for (region, batch) in batches {
            if batch.is_empty() {
                continue;
            }
            let users = batch.hours.len().max(batch.pay.len());
            self.timesheets.save_batch(&region, period, batch).await?;
            info!(%region, %period, users, "committed timesheet batch");
        }
        Ok(())
    }

    /// Builds the payroll report of a region.
    ///
    /// Engineer bonuses come from every stored task dated into the period's
    /// bonus month. Missing timesheet rows use the weekday default.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Timesheets`] or [`PayrollError::Tasks`] when
    /// inputs cannot be loaded.
    pub async fn regional_report(
        &self,
        region: &RegionName,
        period: PayrollPeriod,
        roster: &[StaffMember],
    ) -> PayrollResult<PayrollReport> {
        let sheet = self.load_timesheet(region, period, roster).await?;
        let tasks = self.tasks.list_all().await?;
        let ledger = BonusLedger::for_month(&tasks, period.bonus_month(), &self.policy);

        let rows: Vec<PayrollRow> = roster
            .iter()
            .filter(|member| member.region() == region)
            .map(|member| {
                let timesheet = sheet
                    .hours
                    .get(member.id())
                    .cloned()
                    .unwrap_or_else(|| TimesheetEntry::weekday_default(period, &self.policy));
                let summary = compute_pay(
                    &timesheet,
                    &sheet.pay_for(member.id()),
                    ledger.bonus_for(member.name()),
                    period,
                    &self.policy,
                );
                PayrollRow {
                    staff: member.clone(),
                    timesheet,
                    summary,
                }
            })
            .collect();

        let paid_staff: Vec<String> = rows
            .iter()
            .filter(|row| row.summary.total_pay > Decimal::ZERO)
            .map(|row| row.staff.name().to_owned())
            .collect();
        let details = RegionWorkDetails::collect(
            &tasks,
            region.as_str(),
            &paid_staff,
            period.bonus_month(),
            &self.policy,
        );

        let report = PayrollReport {
            region: region.clone(),
            period,
            work_days: period.work_days(),
            work_hours: period.work_hours(&self.policy),
            rows,
            details,
            skipped_tasks: ledger.skipped().to_vec(),
        };
        info!(
            %region,
            %period,
            staff = report.rows.len(),
            detail_rows = report.details.rows().len(),
            skipped = report.skipped_tasks.len(),
            total_pay = %report.total_pay(),
            "built payroll report"
        );
        Ok(report)
    }
}
