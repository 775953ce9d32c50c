//! Shared test helpers for in-memory repository integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use tasksettle::payroll::{
    adapters::memory::InMemoryTimesheetRepository,
    domain::{StaffMember, UserId},
    services::PayrollService,
};
use tasksettle::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{EngineerSlots, MoneyInputs, TaskChanges, TaskStatus},
    services::{SaveTaskRequest, TaskLifecycleService},
};

/// Clock pinned to noon UTC on a fixed calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to the given date.
    ///
    /// # Panics
    ///
    /// Panics if the date is not a valid calendar date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid calendar date");
        Self(instant)
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

/// Task service type used by the integration tests.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, FixedClock>;

/// Payroll service type used by the integration tests.
pub type TestPayrollService = PayrollService<InMemoryTimesheetRepository, InMemoryTaskRepository>;

/// Task and payroll services sharing one task store.
pub struct Services {
    /// Shared task store.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Task lifecycle service.
    pub lifecycle: TestTaskService,
    /// Payroll service.
    pub payroll: TestPayrollService,
}

impl Services {
    /// Builds services whose clock reads the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(FixedClock::on(year, month, day));
        let lifecycle = TaskLifecycleService::new(Arc::clone(&tasks), clock);
        let payroll = PayrollService::new(
            Arc::new(InMemoryTimesheetRepository::new()),
            Arc::clone(&tasks),
        );
        Self {
            tasks,
            lifecycle,
            payroll,
        }
    }
}

/// Services pinned to 20 April 2024, past the stamp cutoff day.
#[fixture]
pub fn late_april() -> Services {
    Services::on(2024, 4, 20)
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics if the date is not a valid calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builds a roster entry.
///
/// # Panics
///
/// Panics if `id` is blank.
pub fn staff(id: &str, name: &str, region: Option<&str>) -> StaffMember {
    StaffMember::new(UserId::new(id).expect("valid user id"), name, region)
}

/// Builds a request describing completed internal work.
///
/// # Panics
///
/// Panics if more than six engineers are named.
pub fn completed_work(
    work_date: NaiveDate,
    engineers: &[&str],
    service_total: &str,
    region: &str,
) -> SaveTaskRequest {
    SaveTaskRequest::new(
        TaskChanges::new()
            .with_status(TaskStatus::Done)
            .with_work_date(Some(work_date))
            .with_service_region(Some(region.to_owned()))
            .with_engineers(
                EngineerSlots::new(engineers.iter().copied()).expect("at most six engineers"),
            )
            .with_money(MoneyInputs {
                service_total: service_total.to_owned(),
                internal_work: true,
                ..MoneyInputs::default()
            }),
    )
}
