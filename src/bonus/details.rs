//! Completed-work details of one region for a bonus month.

use super::resolver::same_engineer;
use crate::config::SettlementPolicy;
use crate::task::domain::{BonusMonth, Task, TaskId, bonus_month};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One completed task credited to the region's paid staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDetailRow {
    /// Task identifier.
    pub task_id: TaskId,
    /// Operator-facing request number.
    pub request_number: Option<String>,
    /// Date the work was performed.
    pub work_date: NaiveDate,
    /// Credited engineers.
    pub engineers: Vec<String>,
    /// Gross service total.
    pub service_total: Decimal,
    /// Net work price.
    pub work_price: Decimal,
    /// Bonus pool of the task.
    pub bonus: Decimal,
}

/// Sums over every detail row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkDetailTotals {
    /// Sum of service totals.
    pub service_total: Decimal,
    /// Sum of work prices.
    pub work_price: Decimal,
    /// Sum of bonus pools.
    pub bonus: Decimal,
}

/// Completed work of a region dated into one bonus month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionWorkDetails {
    region: String,
    month: BonusMonth,
    rows: Vec<WorkDetailRow>,
    totals: WorkDetailTotals,
}

impl RegionWorkDetails {
    /// Collects the region's settled tasks dated into `month` that credit at
    /// least one engineer from `paid_staff`.
    #[must_use]
    pub fn collect(
        tasks: &[Task],
        region: &str,
        paid_staff: &[String],
        month: BonusMonth,
        policy: &SettlementPolicy,
    ) -> Self {
        let rows: Vec<WorkDetailRow> = tasks
            .iter()
            .filter(|task| task.service_region() == Some(region.trim()))
            .filter(|task| {
                task.engineers().credited().any(|engineer| {
                    paid_staff.iter().any(|name| same_engineer(engineer, name))
                })
            })
            .filter_map(|task| detail_row(task, month, policy))
            .collect();
        let totals = rows.iter().fold(WorkDetailTotals::default(), |acc, row| {
            WorkDetailTotals {
                service_total: acc.service_total.saturating_add(row.service_total),
                work_price: acc.work_price.saturating_add(row.work_price),
                bonus: acc.bonus.saturating_add(row.bonus),
            }
        });
        Self {
            region: region.trim().to_owned(),
            month,
            rows,
            totals,
        }
    }

    /// Returns the region name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the bonus month covered.
    #[must_use]
    pub const fn month(&self) -> BonusMonth {
        self.month
    }

    /// Returns the detail rows in task order.
    #[must_use]
    pub fn rows(&self) -> &[WorkDetailRow] {
        &self.rows
    }

    /// Returns the column totals.
    #[must_use]
    pub const fn totals(&self) -> WorkDetailTotals {
        self.totals
    }
}

fn detail_row(task: &Task, month: BonusMonth, policy: &SettlementPolicy) -> Option<WorkDetailRow> {
    if !task.is_settled() {
        return None;
    }
    let work_date = task.work_date()?;
    let stamped = task.bonus_approval()?.month().ok()?;
    if bonus_month(work_date, stamped) != month {
        return None;
    }
    let rollup = task.rollup();
    Some(WorkDetailRow {
        task_id: task.id(),
        request_number: task.request_number().map(str::to_owned),
        work_date,
        engineers: task.engineers().credited().map(str::to_owned).collect(),
        service_total: rollup.service_total,
        work_price: rollup.work_price,
        bonus: rollup.work_price.saturating_mul(policy.bonus_share),
    })
}
