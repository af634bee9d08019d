//! Offline training for the wardcast prediction service.
//!
//! Generates seeded synthetic datasets mirroring documented hospital
//! traffic patterns, fits the four model pipelines, and writes them out
//! as JSON artifacts for the server to load at startup.

use std::path::PathBuf;

pub mod metrics;
pub mod synth;

/// Seed shared by all generators and fits so a training run reproduces
/// bit-for-bit.
pub const TRAINING_SEED: u64 = 42;

/// Models directory from the first CLI argument, defaulting to `models/`.
pub fn models_dir_from_args() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models"))
}

/// Seeded index shuffle split into (train, test).
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let test_len = ((n as f64) * test_ratio).round() as usize;
    let train = indices.split_off(test_len);
    (train, indices)
}
