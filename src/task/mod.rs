//! Service tasks, their approval workflow and bonus dating.
//!
//! A task moves through its lifecycle status while the warehouse and the
//! accountant approve or reject it independently. Every save recomputes the
//! task's money rollup, and a task that becomes done and approved on both
//! tracks is stamped with the month its bonus is approved in. The module
//! follows a hexagonal layout:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations and the JSON record boundary in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
