//! Record generation for benchmarks.
//!
//! Generators are seeded so every run validates the same records.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tagcheck_core::record;

/// Scale factor for benchmark data generation.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// Tiny scale: 10 records. Use for quick tests.
    Tiny,
    /// Small scale: 100 records
    Small,
    /// Medium scale: 2,000 records
    Medium,
    /// Large scale: 100,000 records
    Large,
}

impl Scale {
    /// Get the record count for this scale.
    pub fn count(&self) -> usize {
        match self {
            Scale::Tiny => 10,
            Scale::Small => 100,
            Scale::Medium => 2_000,
            Scale::Large => 100_000,
        }
    }

    /// Get the number of elements per sequence field.
    pub fn samples_per_reading(&self) -> usize {
        match self {
            Scale::Tiny => 4,
            Scale::Small => 16,
            Scale::Medium => 64,
            Scale::Large => 256,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Medium
    }
}

/// Plan names accepted by [`Account::plan`].
pub const PLANS: [&str; 3] = ["free", "pro", "team"];

/// Channel numbers accepted by [`Reading::channels`].
pub const CHANNELS: [u8; 4] = [1, 2, 4, 8];

/// Upper bound for [`Reading::samples`].
pub const SAMPLE_MAX: i64 = 1_000;

record! {
    /// Scalar-only record.
    #[derive(Debug, Clone)]
    pub struct Account {
        #[validate("len:8")]
        pub handle: String,
        #[validate("in:free,pro,team")]
        pub plan: String,
        #[validate("min:18")]
        pub age: i32,
        #[validate("max:100000")]
        pub credits: i64,
        pub display_name: String,
    }
}

record! {
    /// Sequence-heavy record.
    #[derive(Debug, Clone)]
    pub struct Reading {
        #[validate("len:6")]
        pub sensor: String,
        #[validate("max:1000")]
        pub samples: Vec<i64>,
        #[validate("min:2")]
        pub labels: Vec<String>,
        #[validate("in:1,2,4,8")]
        pub channels: Vec<u8>,
    }
}

/// Generate a random string of specified length.
fn random_string(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Generate accounts that pass validation.
pub fn generate_accounts(count: usize) -> Vec<Account> {
    const SEED: u64 = 12345;
    let mut rng = StdRng::seed_from_u64(SEED);

    (0..count)
        .map(|i| Account {
            handle: random_string(&mut rng, 8),
            plan: PLANS[i % PLANS.len()].to_string(),
            age: rng.gen_range(18..80),
            credits: rng.gen_range(0..=100_000),
            display_name: format!("Account {}", i),
        })
        .collect()
}

/// Generate accounts where every constrained field fails.
pub fn generate_failing_accounts(count: usize) -> Vec<Account> {
    const SEED: u64 = 54321;
    let mut rng = StdRng::seed_from_u64(SEED);

    (0..count)
        .map(|i| {
            let handle_len = rng.gen_range(1..8);
            Account {
                handle: random_string(&mut rng, handle_len),
                plan: "enterprise".to_string(),
                age: rng.gen_range(0..18),
                credits: rng.gen_range(100_001..1_000_000),
                display_name: format!("Failing {}", i),
            }
        })
        .collect()
}

/// Generate readings with `samples` elements per sequence field.
///
/// Roughly one sample in ten exceeds [`SAMPLE_MAX`], so validation reports
/// element-level failures.
pub fn generate_readings(count: usize, samples: usize) -> Vec<Reading> {
    const SEED: u64 = 67890;
    let mut rng = StdRng::seed_from_u64(SEED);

    (0..count)
        .map(|_| {
            let sensor = random_string(&mut rng, 6);
            let values = (0..samples)
                .map(|_| {
                    if rng.gen_ratio(1, 10) {
                        rng.gen_range(SAMPLE_MAX + 1..SAMPLE_MAX * 2)
                    } else {
                        rng.gen_range(0..=SAMPLE_MAX)
                    }
                })
                .collect();
            let labels = (0..samples)
                .map(|_| {
                    let len = rng.gen_range(2..12);
                    random_string(&mut rng, len)
                })
                .collect();
            let channels = (0..samples)
                .map(|_| CHANNELS[rng.gen_range(0..CHANNELS.len())])
                .collect();

            Reading {
                sensor,
                samples: values,
                labels,
                channels,
            }
        })
        .collect()
}
