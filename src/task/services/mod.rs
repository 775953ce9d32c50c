//! Application services for task orchestration.

mod lifecycle;

pub use lifecycle::{
    SaveTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
