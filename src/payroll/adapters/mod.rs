//! Adapter implementations for payroll ports.

pub mod memory;
