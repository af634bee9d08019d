//! Model handles for the wardcast prediction service.
//!
//! A handle pairs a fixed feature schema with a single inference operation:
//! one scalar per row for regression, one category label for
//! classification. Handles are fitted offline, serialized as JSON
//! artifacts, and loaded once at process start into an immutable
//! [`store::ModelStore`]. All feature encoding happens inside the
//! pipelines, so callers hand over raw observations only.

pub mod artifact;
pub mod boosting;
pub mod category;
pub mod encoder;
pub mod error;
pub mod forest;
pub mod pipeline;
pub mod scaler;
pub mod store;

pub use artifact::{Artifact, ArtifactMetadata};
pub use boosting::{GbmConfig, GbmRegressor};
pub use category::{priority_score, urgency_weight, ServiceCategory};
pub use encoder::TabularEncoder;
pub use error::ModelError;
pub use forest::{ForestClassifier, ForestConfig};
pub use pipeline::{ResourcePipeline, SchedulingPipeline, WaitingTimePipeline};
pub use scaler::StandardScaler;
pub use store::ModelStore;
