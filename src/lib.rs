//! Tasksettle: task approval and settlement engine.
//!
//! This crate tracks service-request ("task") lifecycles through the
//! warehouse and accountant approval gates and derives the financial figures
//! that hang off approved work: material and labour sums, the monthly
//! performance bonus, and regional payroll.
//!
//! # Architecture
//!
//! Tasksettle follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory stores and the task serialization record
//!
//! # Modules
//!
//! - [`config`]: Named settlement policy constants and environment loading
//! - [`task`]: Money rollup, approval state machine and bonus dating
//! - [`bonus`]: Per-engineer bonus allocation and regional work details
//! - [`payroll`]: Timesheets, pay data and the regional payroll aggregator

pub mod bonus;
pub mod config;
pub mod payroll;
pub mod task;

#[cfg(test)]
mod test_support;
