//! Benchmark harness helpers.

use std::sync::Once;

use tagcheck_core::{Inspect, Validator, ValidatorConfig};
use tracing_subscriber::EnvFilter;

use crate::fixtures::{
    generate_accounts, generate_failing_accounts, generate_readings, Account, Reading, Scale,
};

static TRACING: Once = Once::new();

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every benchmark; only the first call installs it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Pre-generated records and a validator for one benchmark run.
pub struct BenchContext {
    pub validator: Validator,
    pub accounts: Vec<Account>,
    pub failing_accounts: Vec<Account>,
    pub readings: Vec<Reading>,
}

impl BenchContext {
    /// Create a context with the default validator configuration.
    pub fn with_scale(scale: Scale) -> Self {
        Self::with_config(scale, ValidatorConfig::default())
    }

    /// Create a context with a custom validator configuration.
    pub fn with_config(scale: Scale, config: ValidatorConfig) -> Self {
        let count = scale.count();
        Self {
            validator: Validator::new(config),
            accounts: generate_accounts(count),
            failing_accounts: generate_failing_accounts(count),
            readings: generate_readings(count, scale.samples_per_reading()),
        }
    }

    /// Validate every record and return the total number of failures.
    pub fn count_failures<T: Inspect>(&self, records: &[T]) -> usize {
        records
            .iter()
            .map(|record| match self.validator.validate(record) {
                Ok(()) => 0,
                Err(err) => err.validation_errors().map_or(0, |errors| errors.len()),
            })
            .sum()
    }
}

impl Default for BenchContext {
    fn default() -> Self {
        Self::with_scale(Scale::default())
    }
}
