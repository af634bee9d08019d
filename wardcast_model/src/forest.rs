//! Bagged classification trees with gini splits.
//!
//! Each tree trains on a seeded bootstrap sample over a random feature
//! subset per node; the forest averages class probabilities and takes the
//! highest-scoring label.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    feature_idx: Option<usize>,
    threshold: f64,
    probs: Vec<f64>,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(probs: Vec<f64>) -> Self {
        Self {
            feature_idx: None,
            threshold: 0.0,
            probs,
            left: None,
            right: None,
        }
    }

    fn class_probs(&self, row: &[f64]) -> &[f64] {
        match (self.feature_idx, &self.left, &self.right) {
            (Some(f), Some(left), Some(right)) => {
                if row.get(f).copied().unwrap_or(0.0) <= self.threshold {
                    left.class_probs(row)
                } else {
                    right.class_probs(row)
                }
            }
            _ => &self.probs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    n_classes: usize,
    trees: Vec<Node>,
}

impl ForestClassifier {
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        config: &ForestConfig,
    ) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if rows.len() != labels.len() {
            return Err(ModelError::TrainingSizeMismatch {
                rows: rows.len(),
                targets: labels.len(),
            });
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(ModelError::Inference(format!(
                "label {bad} out of range for {n_classes} classes"
            )));
        }

        let mut trees = Vec::with_capacity(config.n_trees);
        for i in 0..config.n_trees {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let sample: Vec<usize> = (0..rows.len())
                .map(|_| rng.gen_range(0..rows.len()))
                .collect();
            trees.push(grow(rows, labels, &sample, n_classes, config, 0, &mut rng));
        }

        Ok(Self { n_classes, trees })
    }

    pub fn predict_probs(&self, row: &[f64]) -> Vec<f64> {
        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in probs.iter_mut().zip(tree.class_probs(row)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n;
        }
        probs
    }

    /// Highest-probability class index; ties break toward the lower index.
    pub fn predict(&self, row: &[f64]) -> usize {
        let probs = self.predict_probs(row);
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }
        best
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

fn counts_and_gini(labels: &[usize], indices: &[usize], n_classes: usize) -> (Vec<f64>, f64) {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    let n = indices.len() as f64;
    let probs: Vec<f64> = counts.iter().map(|&c| c as f64 / n).collect();
    let gini = 1.0 - probs.iter().map(|p| p * p).sum::<f64>();
    (probs, gini)
}

fn grow(
    rows: &[Vec<f64>],
    labels: &[usize],
    indices: &[usize],
    n_classes: usize,
    config: &ForestConfig,
    depth: usize,
    rng: &mut StdRng,
) -> Node {
    let (probs, gini) = counts_and_gini(labels, indices, n_classes);
    if depth >= config.max_depth || indices.len() < config.min_samples_split || gini == 0.0 {
        return Node::leaf(probs);
    }

    let n_features = rows[0].len();
    let features_to_try = ((n_features as f64).sqrt().ceil() as usize).max(1);
    let mut best: Option<(f64, usize, f64)> = None;

    for _ in 0..features_to_try {
        let feature_idx = rng.gen_range(0..n_features);
        let mut values: Vec<f64> = indices.iter().map(|&i| rows[i][feature_idx]).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let step = (values.len() / 10).max(1);
        for split in (0..values.len()).step_by(step) {
            let threshold = values[split];
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| rows[i][feature_idx] <= threshold);
            if left.len() < config.min_samples_leaf || right.len() < config.min_samples_leaf {
                continue;
            }

            let (_, gini_left) = counts_and_gini(labels, &left, n_classes);
            let (_, gini_right) = counts_and_gini(labels, &right, n_classes);
            let weighted = (left.len() as f64 * gini_left + right.len() as f64 * gini_right)
                / indices.len() as f64;

            if best.as_ref().map_or(true, |(g, _, _)| weighted < *g) {
                best = Some((weighted, feature_idx, threshold));
            }
        }
    }

    match best {
        Some((weighted, feature_idx, threshold)) if weighted < gini - 1e-12 => {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| rows[i][feature_idx] <= threshold);
            let left_node = grow(rows, labels, &left, n_classes, config, depth + 1, rng);
            let right_node = grow(rows, labels, &right, n_classes, config, depth + 1, rng);
            Node {
                feature_idx: Some(feature_idx),
                threshold,
                probs: Vec::new(),
                left: Some(Box::new(left_node)),
                right: Some(Box::new(right_node)),
            }
        }
        _ => Node::leaf(probs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two clusters per class along one axis; trivially separable.
    fn separable_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..300 {
            let class = i % 3;
            let x = class as f64 * 10.0 + (i % 7) as f64 * 0.1;
            rows.push(vec![x, (i % 5) as f64]);
            labels.push(class);
        }
        (rows, labels)
    }

    #[test]
    fn learns_a_separable_problem() {
        let (rows, labels) = separable_data();
        let config = ForestConfig {
            n_trees: 25,
            ..ForestConfig::default()
        };
        let forest = ForestClassifier::fit(&rows, &labels, 3, &config).unwrap();

        let correct = rows
            .iter()
            .zip(&labels)
            .filter(|(row, &label)| forest.predict(row) == label)
            .count();
        let accuracy = correct as f64 / rows.len() as f64;
        assert!(accuracy > 0.9, "accuracy too low: {accuracy}");
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (rows, labels) = separable_data();
        let config = ForestConfig {
            n_trees: 10,
            ..ForestConfig::default()
        };
        let forest = ForestClassifier::fit(&rows, &labels, 3, &config).unwrap();
        let probs = forest.predict_probs(&[10.0, 2.0]);
        assert_eq!(probs.len(), 3);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_labels() {
        let result = ForestClassifier::fit(
            &[vec![1.0], vec![2.0]],
            &[0, 5],
            3,
            &ForestConfig::default(),
        );
        assert!(matches!(result, Err(ModelError::Inference(_))));
    }
}
