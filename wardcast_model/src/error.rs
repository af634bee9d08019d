use thiserror::Error;

/// Errors raised by model fitting, inference, and artifact persistence.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode model artifact {path}: {source}")]
    ArtifactDecode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty training set")]
    EmptyTrainingSet,
    #[error("training set size mismatch: {rows} rows vs {targets} targets")]
    TrainingSizeMismatch { rows: usize, targets: usize },
    #[error("feature width mismatch: expected {expected}, got {got}")]
    WidthMismatch { expected: usize, got: usize },
    #[error("unknown urgency level: {0}")]
    UnknownUrgency(String),
    #[error("unknown service category: {0}")]
    UnknownCategory(String),
    #[error("inference failed: {0}")]
    Inference(String),
}
