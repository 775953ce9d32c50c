//! Shared world state for approval workflow BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use eyre::{WrapErr, eyre};
use mockable::Clock;
use rstest::fixture;
use tasksettle::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ApprovalDecision, ApprovalRole, Task, TaskId},
    services::{SaveTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use tracing_subscriber::EnvFilter;

/// Clock pinned to noon UTC on the scenario's date.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock(DateTime<Utc>);

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, ScenarioClock>;

/// Scenario world for approval workflow behaviour tests.
#[derive(Default)]
pub struct ApprovalWorld {
    pub service: Option<TestTaskService>,
    pub task_id: Option<TaskId>,
    pub last_save_result: Option<Result<Task, TaskLifecycleError>>,
}

impl ApprovalWorld {
    /// Starts the scenario's service with a clock reading `today`.
    pub fn start_on(&mut self, today: NaiveDate) -> Result<(), eyre::Report> {
        let noon = today
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| eyre!("invalid time of day"))?;
        let clock = ScenarioClock(Utc.from_utc_datetime(&noon));
        self.service = Some(TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(clock),
        ));
        Ok(())
    }

    /// Returns the started service.
    pub fn service(&self) -> Result<&TestTaskService, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre!("scenario date has not been set"))
    }

    /// Returns the identifier of the scenario's task.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre!("no task has been created in this scenario"))
    }

    /// Saves changes to the scenario's task, keeping the outcome.
    pub fn save(&mut self, request: SaveTaskRequest) -> Result<(), eyre::Report> {
        let id = self.task_id()?;
        let result = run_async(self.service()?.save_task(id, request));
        self.last_save_result = Some(result);
        Ok(())
    }

    /// Records a decision on the scenario's task, keeping the outcome.
    pub fn decide(
        &mut self,
        role: ApprovalRole,
        decision: ApprovalDecision,
    ) -> Result<(), eyre::Report> {
        let id = self.task_id()?;
        let service = self.service()?;
        let result = run_async(service.decide_approval(id, role, decision, Some("reviewer")));
        self.last_save_result = Some(result);
        Ok(())
    }

    /// Records a decision that the scenario expects to succeed.
    pub fn decide_ok(
        &mut self,
        role: ApprovalRole,
        decision: ApprovalDecision,
    ) -> Result<(), eyre::Report> {
        let id = self.task_id()?;
        run_async(self.service()?.decide_approval(id, role, decision, Some("reviewer")))
            .wrap_err_with(|| format!("record {role} decision"))?;
        Ok(())
    }

    /// Loads the current state of the scenario's task.
    pub fn stored_task(&self) -> Result<Task, eyre::Report> {
        let id = self.task_id()?;
        run_async(self.service()?.find_by_id(id))
            .wrap_err("load scenario task")?
            .ok_or_else(|| eyre!("scenario task missing from store"))
    }
}

/// Parses a role name used in step text.
pub fn parse_role(text: &str) -> Result<ApprovalRole, eyre::Report> {
    ApprovalRole::ALL
        .into_iter()
        .find(|role| role.as_str() == text)
        .ok_or_else(|| eyre!("unknown approval role: {text}"))
}

/// Parses a `YYYY-MM-DD` date used in step text.
pub fn parse_date(text: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").wrap_err_with(|| format!("parse date {text}"))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ApprovalWorld {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    // Another scenario in this binary may already own the global subscriber.
    if installed.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
    ApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
