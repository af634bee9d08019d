//! Gradient-boosted regression over depth-1 trees.
//!
//! Each round fits a stump to the current residuals over a random subset
//! of features and adds it at the configured learning rate. Seeded, so a
//! fit is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmConfig {
    pub n_trees: usize,
    pub learning_rate: f64,
    pub seed: u64,
}

impl Default for GbmConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            learning_rate: 0.1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Stump {
    feature_idx: usize,
    threshold: f64,
    left_value: f64,
    right_value: f64,
}

impl Stump {
    fn predict(&self, row: &[f64]) -> f64 {
        if row.get(self.feature_idx).copied().unwrap_or(0.0) <= self.threshold {
            self.left_value
        } else {
            self.right_value
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmRegressor {
    base: f64,
    learning_rate: f64,
    trees: Vec<Stump>,
}

impl GbmRegressor {
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], config: &GbmConfig) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if rows.len() != targets.len() {
            return Err(ModelError::TrainingSizeMismatch {
                rows: rows.len(),
                targets: targets.len(),
            });
        }
        let n_features = rows[0].len();
        let base = targets.iter().sum::<f64>() / targets.len() as f64;
        let mut predictions = vec![base; rows.len()];
        let mut trees = Vec::with_capacity(config.n_trees);
        let mut rng = StdRng::seed_from_u64(config.seed);

        for _ in 0..config.n_trees {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(&predictions)
                .map(|(y, p)| y - p)
                .collect();
            let Some(stump) = fit_stump(rows, &residuals, n_features, &mut rng) else {
                break;
            };
            for (pred, row) in predictions.iter_mut().zip(rows) {
                *pred += config.learning_rate * stump.predict(row);
            }
            trees.push(stump);
        }

        Ok(Self {
            base,
            learning_rate: config.learning_rate,
            trees,
        })
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.base
            + self
                .trees
                .iter()
                .map(|t| self.learning_rate * t.predict(row))
                .sum::<f64>()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

fn fit_stump(
    rows: &[Vec<f64>],
    residuals: &[f64],
    n_features: usize,
    rng: &mut StdRng,
) -> Option<Stump> {
    let features_to_try = (n_features / 3).clamp(1, 10);
    let mut best: Option<(f64, Stump)> = None;

    for _ in 0..features_to_try {
        let feature_idx = rng.gen_range(0..n_features);
        let mut pairs: Vec<(f64, f64)> = rows
            .iter()
            .zip(residuals)
            .map(|(row, &r)| (row[feature_idx], r))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let step = (pairs.len() / 10).max(1);
        for split in (0..pairs.len()).step_by(step) {
            let threshold = pairs[split].0;
            let (left, right): (Vec<(f64, f64)>, Vec<(f64, f64)>) =
                pairs.iter().copied().partition(|p| p.0 <= threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let left_value = left.iter().map(|p| p.1).sum::<f64>() / left.len() as f64;
            let right_value = right.iter().map(|p| p.1).sum::<f64>() / right.len() as f64;
            let sse = left
                .iter()
                .map(|p| (p.1 - left_value).powi(2))
                .sum::<f64>()
                + right
                    .iter()
                    .map(|p| (p.1 - right_value).powi(2))
                    .sum::<f64>();

            if best.as_ref().map_or(true, |(s, _)| sse < *s) {
                best = Some((
                    sse,
                    Stump {
                        feature_idx,
                        threshold,
                        left_value,
                        right_value,
                    },
                ));
            }
        }
    }

    best.map(|(_, stump)| stump)
}
