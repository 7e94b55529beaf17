//! Unit tests - Public API behavior without files or environment
//!
//! These tests exercise one component at a time through the crate's public surface.

mod aggregation_clause_tests;
