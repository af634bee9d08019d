//! Process-wide set of trained model handles.
//!
//! Loaded synchronously before any request handling begins and never
//! mutated afterwards, so concurrent readers need no locking; share the
//! store behind an `Arc`.

use std::path::Path;

use crate::artifact::Artifact;
use crate::error::ModelError;
use crate::pipeline::{ResourcePipeline, SchedulingPipeline, WaitingTimePipeline};

pub const PATIENT_FLOW_ARTIFACT: &str = "patient_flow.json";
pub const APPOINTMENT_ARTIFACT: &str = "appointment_scheduling.json";
pub const RESOURCE_BED_ARTIFACT: &str = "resource_beds.json";
pub const RESOURCE_STAFF_ARTIFACT: &str = "resource_staff.json";

pub struct ModelStore {
    pub waiting_time: WaitingTimePipeline,
    pub scheduling: SchedulingPipeline,
    pub bed_occupancy: ResourcePipeline,
    pub staff_needed: ResourcePipeline,
}

impl ModelStore {
    /// Load all four artifacts from `dir`. Any missing or corrupt artifact
    /// is fatal: the service must not start without its models.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let waiting_time = load_pipeline::<WaitingTimePipeline>(dir, PATIENT_FLOW_ARTIFACT)?;
        let scheduling = load_pipeline::<SchedulingPipeline>(dir, APPOINTMENT_ARTIFACT)?;
        let bed_occupancy = load_pipeline::<ResourcePipeline>(dir, RESOURCE_BED_ARTIFACT)?;
        let staff_needed = load_pipeline::<ResourcePipeline>(dir, RESOURCE_STAFF_ARTIFACT)?;
        Ok(Self {
            waiting_time,
            scheduling,
            bed_occupancy,
            staff_needed,
        })
    }
}

fn load_pipeline<M: serde::Serialize + serde::de::DeserializeOwned>(
    dir: &Path,
    file_name: &str,
) -> Result<M, ModelError> {
    let path = dir.join(file_name);
    let artifact = Artifact::<M>::load(&path)?;
    log::info!(
        "loaded model {} v{} ({})",
        artifact.metadata.name,
        artifact.metadata.version,
        artifact.metadata.target
    );
    Ok(artifact.model)
}
