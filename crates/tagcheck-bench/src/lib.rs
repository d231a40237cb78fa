//! tagcheck Benchmark Suite
//!
//! Criterion benchmarks for record validation.
//!
//! # Benchmark Categories
//!
//! - **Validate**: passing records, failing records, sequence-heavy records
//! - **Parse**: tag parsing and kind resolution

pub mod fixtures;
pub mod harness;

pub use fixtures::{generate_accounts, generate_failing_accounts, generate_readings, Scale};
pub use harness::{init_tracing, BenchContext};
