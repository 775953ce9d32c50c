//! Port contracts for task settlement.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
#[cfg(test)]
pub use repository::MockTaskRepository;
