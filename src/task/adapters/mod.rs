//! Adapter implementations for task ports and the task record boundary.

pub mod memory;
pub mod record;

pub use record::{TaskRecord, TaskRecordError};
