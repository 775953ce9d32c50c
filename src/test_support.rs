//! Shared helpers for unit tests.

use crate::config::SettlementPolicy;
use crate::task::domain::{
    ApprovalDecision, ApprovalRole, EngineerSlots, MoneyInputs, Task, TaskChanges, TaskStatus,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to noon UTC on a fixed calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self(instant)
    }

    /// Returns the pinned calendar date.
    pub fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a calendar date, falling back to the Unix epoch for invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Builds a task that is done and approved on both tracks, saved on the
/// clock's date.
pub fn settled_task(
    clock: &FixedClock,
    work_date: NaiveDate,
    engineers: &[&str],
    service_total: &str,
    region: Option<&str>,
) -> Task {
    let mut task = Task::new(clock);
    let changes = TaskChanges::new()
        .with_status(TaskStatus::Done)
        .with_work_date(Some(work_date))
        .with_service_region(region.map(str::to_owned))
        .with_engineers(
            EngineerSlots::new(engineers.iter().copied()).expect("at most six engineers"),
        )
        .with_money(MoneyInputs {
            service_total: service_total.to_owned(),
            internal_work: true,
            ..MoneyInputs::default()
        })
        .with_decision(ApprovalRole::Warehouse, ApprovalDecision::approve())
        .with_decision(ApprovalRole::Accountant, ApprovalDecision::approve());
    task.save(changes, None, &SettlementPolicy::default(), clock)
        .expect("settling save should succeed");
    task
}
