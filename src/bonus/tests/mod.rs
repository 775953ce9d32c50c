//! Unit tests for bonus allocation.
