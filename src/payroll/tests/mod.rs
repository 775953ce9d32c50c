//! Unit tests for the payroll module.
