use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Per-column standardization fitted on a training matrix.
///
/// A zero-variance column transforms to 0 rather than dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let width = rows[0].len();
        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            if row.len() != width {
                return Err(ModelError::WidthMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
            for (mean, x) in means.iter_mut().zip(row) {
                *mean += x;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut vars = vec![0.0; width];
        for row in rows {
            for ((var, mean), x) in vars.iter_mut().zip(&means).zip(row) {
                let d = x - mean;
                *var += d * d;
            }
        }
        let stds = vars.into_iter().map(|v| (v / n).sqrt()).collect();

        Ok(Self { means, stds })
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.means.len() {
            return Err(ModelError::WidthMismatch {
                expected: self.means.len(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(x, (mean, std))| if *std == 0.0 { 0.0 } else { (x - mean) / std })
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_each_column() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0], vec![5.0, 10.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let out = scaler.transform(&rows).unwrap();

        // First column: mean 3, population std sqrt(8/3).
        let std = (8.0f64 / 3.0).sqrt();
        assert!((out[0][0] - (1.0 - 3.0) / std).abs() < 1e-12);
        assert!((out[2][0] - (5.0 - 3.0) / std).abs() < 1e-12);
        // Constant column maps to zero.
        assert_eq!(out[1][1], 0.0);
    }

    #[test]
    fn rejects_width_mismatch() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            scaler.transform_row(&[1.0]),
            Err(ModelError::WidthMismatch { expected: 2, got: 1 })
        ));
    }
}
