//! Callee-side tabular encoding: the preprocessing stage a pipeline owns.
//!
//! Numeric columns are standardized; categorical columns expand into one
//! indicator per category seen at fit time. A category unseen at fit time
//! encodes as all zeros, never as an error.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::scaler::StandardScaler;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoricalColumn {
    name: String,
    categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularEncoder {
    numeric: Vec<String>,
    scaler: StandardScaler,
    categorical: Vec<CategoricalColumn>,
}

impl TabularEncoder {
    /// Fit from per-column training data. Every column must have the same
    /// number of rows.
    pub fn fit(
        numeric: &[(&str, Vec<f64>)],
        categorical: &[(&str, Vec<String>)],
    ) -> Result<Self, ModelError> {
        let n_rows = numeric
            .first()
            .map(|(_, v)| v.len())
            .or_else(|| categorical.first().map(|(_, v)| v.len()))
            .unwrap_or(0);
        if n_rows == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        for (_, values) in numeric {
            if values.len() != n_rows {
                return Err(ModelError::TrainingSizeMismatch {
                    rows: n_rows,
                    targets: values.len(),
                });
            }
        }
        for (_, values) in categorical {
            if values.len() != n_rows {
                return Err(ModelError::TrainingSizeMismatch {
                    rows: n_rows,
                    targets: values.len(),
                });
            }
        }

        let numeric_rows: Vec<Vec<f64>> = (0..n_rows)
            .map(|r| numeric.iter().map(|(_, values)| values[r]).collect())
            .collect();
        let scaler = StandardScaler::fit(&numeric_rows)?;

        let categorical = categorical
            .iter()
            .map(|(name, values)| {
                let mut categories: Vec<String> = values.to_vec();
                categories.sort();
                categories.dedup();
                CategoricalColumn {
                    name: name.to_string(),
                    categories,
                }
            })
            .collect();

        Ok(Self {
            numeric: numeric.iter().map(|(n, _)| n.to_string()).collect(),
            scaler,
            categorical,
        })
    }

    /// Encode one row: numeric values in fit order, then categorical
    /// values in fit order.
    pub fn transform(&self, numeric: &[f64], categorical: &[&str]) -> Result<Vec<f64>, ModelError> {
        if categorical.len() != self.categorical.len() {
            return Err(ModelError::WidthMismatch {
                expected: self.categorical.len(),
                got: categorical.len(),
            });
        }
        let mut row = self.scaler.transform_row(numeric)?;
        for (column, value) in self.categorical.iter().zip(categorical) {
            for category in &column.categories {
                row.push(if category == value { 1.0 } else { 0.0 });
            }
        }
        Ok(row)
    }

    /// Encoded column names: numeric names, then `Column_Category` blocks.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.numeric.clone();
        for column in &self.categorical {
            for category in &column.categories {
                names.push(format!("{}_{}", column.name, category));
            }
        }
        names
    }

    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fitted() -> TabularEncoder {
        TabularEncoder::fit(
            &[("Age", vec![20.0, 40.0, 60.0])],
            &[(
                "Urgency",
                vec!["Low".into(), "High".into(), "Low".into()],
            )],
        )
        .unwrap()
    }

    #[test]
    fn encodes_numeric_then_categorical() {
        let enc = fitted();
        assert_eq!(enc.feature_names(), vec!["Age", "Urgency_High", "Urgency_Low"]);
        let row = enc.transform(&[40.0], &["High"]).unwrap();
        // Age 40 is the mean, so it scales to zero.
        assert_eq!(row, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn unknown_category_encodes_as_zeros() {
        let enc = fitted();
        let row = enc.transform(&[40.0], &["Critical"]).unwrap();
        assert_eq!(&row[1..], &[0.0, 0.0]);
    }

    #[test]
    fn width_matches_names() {
        let enc = fitted();
        assert_eq!(enc.width(), enc.feature_names().len());
    }
}
