//! Service layer for task creation, saves and approval decisions.

use crate::config::SettlementPolicy;
use crate::task::{
    domain::{ApprovalDecision, ApprovalRole, Task, TaskChanges, TaskId, ValidationFailure},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for saving edits to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveTaskRequest {
    changes: TaskChanges,
    actor: Option<String>,
}

impl SaveTaskRequest {
    /// Creates a request carrying the given edits.
    #[must_use]
    pub fn new(changes: TaskChanges) -> Self {
        Self {
            changes,
            actor: None,
        }
    }

    /// Sets the display name of the person saving.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The save violated one or more task rules.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: Arc<SettlementPolicy>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service using the default settlement policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, Arc::new(SettlementPolicy::default()))
    }

    /// Creates a service using the given settlement policy.
    #[must_use]
    pub const fn with_policy(
        repository: Arc<R>,
        clock: Arc<C>,
        policy: Arc<SettlementPolicy>,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Creates and stores a task from its initial field values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the initial values
    /// break a task rule, or [`TaskLifecycleError::Repository`] when the
    /// repository rejects persistence.
    pub async fn create_task(&self, request: SaveTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = Task::new(&*self.clock);
        task.save(
            request.changes,
            request.actor.as_deref(),
            &self.policy,
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), status = %task.status(), "created task");
        Ok(task)
    }

    /// Applies edits to a stored task as a single save.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Validation`] listing every violated rule, or
    /// [`TaskLifecycleError::Repository`] on persistence failure. Nothing is
    /// persisted when validation fails.
    pub async fn save_task(
        &self,
        id: TaskId,
        request: SaveTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        task.save(
            request.changes,
            request.actor.as_deref(),
            &self.policy,
            &*self.clock,
        )?;
        self.repository.update(&task).await?;
        info!(
            task_id = %task.id(),
            status = %task.status(),
            warehouse = %task.warehouse().state(),
            accountant = %task.accountant().state(),
            settled = task.is_settled(),
            "saved task"
        );
        Ok(task)
    }

    /// Records one role's approval decision on a stored task.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::save_task`].
    pub async fn decide_approval(
        &self,
        id: TaskId,
        role: ApprovalRole,
        decision: ApprovalDecision,
        actor: Option<&str>,
    ) -> TaskLifecycleResult<Task> {
        let mut request = SaveTaskRequest::new(TaskChanges::new().with_decision(role, decision));
        if let Some(name) = actor {
            request = request.with_actor(name);
        }
        self.save_task(id, request).await
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when listing fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }
}
