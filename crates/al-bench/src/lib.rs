//! Fixture generators shared by the end-to-end tests and benchmarks.

pub mod fixture;
