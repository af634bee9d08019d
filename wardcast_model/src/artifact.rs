//! JSON model artifacts: a metadata header plus the serialized pipeline.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub version: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// What the model predicts, for humans reading the artifact.
    pub target: String,
}

impl ArtifactMetadata {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact<M> {
    pub metadata: ArtifactMetadata,
    pub model: M,
}

impl<M: Serialize + DeserializeOwned> Artifact<M> {
    pub fn new(metadata: ArtifactMetadata, model: M) -> Self {
        Self { metadata, model }
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            ModelError::ArtifactDecode {
                path: path.display().to_string(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| ModelError::ArtifactIo {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = fs::read_to_string(path).map_err(|source| ModelError::ArtifactIo {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ModelError::ArtifactDecode {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosting::{GbmConfig, GbmRegressor};

    #[test]
    fn save_load_round_trip() {
        let rows: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = rows.iter().map(|r| 2.0 * r[0]).collect();
        let config = GbmConfig {
            n_trees: 20,
            ..GbmConfig::default()
        };
        let model = GbmRegressor::fit(&rows, &targets, &config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let artifact = Artifact::new(ArtifactMetadata::new("test", "doubling"), model);
        artifact.save(&path).unwrap();

        let loaded = Artifact::<GbmRegressor>::load(&path).unwrap();
        assert_eq!(loaded.metadata.name, "test");
        assert_eq!(
            artifact.model.predict(&[21.0]),
            loaded.model.predict(&[21.0])
        );
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let result = Artifact::<GbmRegressor>::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(ModelError::ArtifactIo { .. })));
    }
}
