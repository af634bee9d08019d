//! Typed prediction pipelines: raw observation in, prediction out.
//!
//! Every pipeline owns its full encoding stage, so callers never build
//! feature columns themselves. The waiting-time and resource pipelines
//! encode, align to the schema fixed at fit time, standardize, and
//! regress; the scheduling pipeline runs its tabular encoder and the
//! classifier.

use serde::{Deserialize, Serialize};
use wardcast_features::align;
use wardcast_features::encode::{
    is_weekend, one_hot, resource_features, time_of_day, waiting_time_features,
    RESOURCE_DEPARTMENTS, TIME_OF_DAY,
};
use wardcast_features::{
    AppointmentObservation, FeatureVector, ResourceObservation, WaitingTimeObservation,
};

use crate::boosting::{GbmConfig, GbmRegressor};
use crate::category::ServiceCategory;
use crate::encoder::TabularEncoder;
use crate::error::ModelError;
use crate::forest::{ForestClassifier, ForestConfig};
use crate::scaler::StandardScaler;

/// Waiting-time regression: gradient-boosted trees over cyclic/one-hot
/// encoded arrival context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingTimePipeline {
    schema: Vec<String>,
    scaler: StandardScaler,
    model: GbmRegressor,
}

/// The training column set is a superset of what the serving encoder
/// produces: weekend and time-of-day columns exist only here, and
/// alignment zero-fills them at serving time.
fn waiting_time_training_features(obs: &WaitingTimeObservation) -> FeatureVector {
    let mut v = waiting_time_features(obs);
    v.insert("IsWeekend", is_weekend(obs.day_of_week));
    one_hot(&mut v, "TimeOfDay", time_of_day(obs.hour), &TIME_OF_DAY);
    v
}

impl WaitingTimePipeline {
    pub fn fit(
        observations: &[WaitingTimeObservation],
        waits: &[f64],
        config: &GbmConfig,
    ) -> Result<Self, ModelError> {
        if observations.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let vectors: Vec<FeatureVector> = observations
            .iter()
            .map(waiting_time_training_features)
            .collect();
        let schema: Vec<String> = vectors[0].names().to_vec();
        let matrix: Vec<Vec<f64>> = vectors
            .iter()
            .map(|v| align(v, &schema).values().to_vec())
            .collect();
        let scaler = StandardScaler::fit(&matrix)?;
        let scaled = scaler.transform(&matrix)?;
        let model = GbmRegressor::fit(&scaled, waits, config)?;
        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    /// Predicted waiting time in minutes.
    pub fn predict(&self, obs: &WaitingTimeObservation) -> Result<f64, ModelError> {
        let aligned = align(&waiting_time_features(obs), &self.schema);
        let row = self.scaler.transform_row(aligned.values())?;
        Ok(self.model.predict(&row))
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }
}

/// Resource regression: one instance per target (bed occupancy rate,
/// staff needed) over the same calendar/volume feature row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePipeline {
    schema: Vec<String>,
    scaler: StandardScaler,
    model: GbmRegressor,
}

/// Schema fixed at training time: cyclic calendar pairs, volumes, and the
/// department indicators. Raw `Month`/`DayOfWeek` stay out, so alignment
/// drops them from the encoder's output.
fn resource_schema() -> Vec<String> {
    let mut schema: Vec<String> = [
        "Month_sin",
        "Month_cos",
        "DayOfWeek_sin",
        "DayOfWeek_cos",
        "IsHoliday",
        "OutpatientVisits",
        "InpatientAdmissions",
        "StaffAvailable",
        "AvgLengthOfStay",
        "Year",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for department in RESOURCE_DEPARTMENTS {
        schema.push(format!("Department_{department}"));
    }
    schema
}

impl ResourcePipeline {
    pub fn fit(
        observations: &[ResourceObservation],
        targets: &[f64],
        config: &GbmConfig,
    ) -> Result<Self, ModelError> {
        if observations.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let schema = resource_schema();
        let matrix: Vec<Vec<f64>> = observations
            .iter()
            .map(|obs| align(&resource_features(obs), &schema).values().to_vec())
            .collect();
        let scaler = StandardScaler::fit(&matrix)?;
        let scaled = scaler.transform(&matrix)?;
        let model = GbmRegressor::fit(&scaled, targets, config)?;
        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    pub fn predict(&self, obs: &ResourceObservation) -> Result<f64, ModelError> {
        let aligned = align(&resource_features(obs), &self.schema);
        let row = self.scaler.transform_row(aligned.values())?;
        Ok(self.model.predict(&row))
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }
}

/// Appointment service-time classification with a derived priority score
/// computed by [`crate::category::priority_score`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingPipeline {
    encoder: TabularEncoder,
    forest: ForestClassifier,
}

impl SchedulingPipeline {
    pub fn fit(
        observations: &[AppointmentObservation],
        labels: &[ServiceCategory],
        config: &ForestConfig,
    ) -> Result<Self, ModelError> {
        if observations.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if observations.len() != labels.len() {
            return Err(ModelError::TrainingSizeMismatch {
                rows: observations.len(),
                targets: labels.len(),
            });
        }

        let ages: Vec<f64> = observations.iter().map(|o| o.age).collect();
        let genders: Vec<String> = observations.iter().map(|o| o.gender.clone()).collect();
        let visit_types: Vec<String> = observations.iter().map(|o| o.visit_type.clone()).collect();
        let urgencies: Vec<String> = observations.iter().map(|o| o.urgency.clone()).collect();
        let departments: Vec<String> = observations.iter().map(|o| o.department.clone()).collect();

        let encoder = TabularEncoder::fit(
            &[("Age", ages)],
            &[
                ("Gender", genders),
                ("VisitType", visit_types),
                ("Urgency", urgencies),
                ("Department", departments),
            ],
        )?;

        let rows: Vec<Vec<f64>> = observations
            .iter()
            .map(|o| Self::encode(&encoder, o))
            .collect::<Result<_, _>>()?;
        let label_indices: Vec<usize> = labels.iter().map(|c| c.index()).collect();
        let forest = ForestClassifier::fit(&rows, &label_indices, ServiceCategory::ALL.len(), config)?;

        Ok(Self { encoder, forest })
    }

    fn encode(encoder: &TabularEncoder, obs: &AppointmentObservation) -> Result<Vec<f64>, ModelError> {
        encoder.transform(
            &[obs.age],
            &[&obs.gender, &obs.visit_type, &obs.urgency, &obs.department],
        )
    }

    pub fn predict(&self, obs: &AppointmentObservation) -> Result<ServiceCategory, ModelError> {
        let row = Self::encode(&self.encoder, obs)?;
        let index = self.forest.predict(&row);
        ServiceCategory::from_index(index)
            .ok_or_else(|| ModelError::Inference(format!("class index {index} out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flow_observation(hour: f64, queue: f64) -> WaitingTimeObservation {
        WaitingTimeObservation {
            hour,
            day_of_week: (hour as usize % 7) as f64,
            month: (hour as usize % 12 + 1) as f64,
            queue_length: queue,
            service_time: 10.0,
            patient_type: "Routine".into(),
            department: "General".into(),
            is_holiday: false,
        }
    }

    #[test]
    fn waiting_time_schema_extends_the_serving_columns() {
        let observations: Vec<WaitingTimeObservation> =
            (0..60).map(|i| flow_observation(i as f64 % 24.0, i as f64)).collect();
        let waits: Vec<f64> = observations.iter().map(|o| o.queue_length * 7.0).collect();
        let config = GbmConfig {
            n_trees: 30,
            ..GbmConfig::default()
        };
        let pipeline = WaitingTimePipeline::fit(&observations, &waits, &config).unwrap();

        let schema = pipeline.schema();
        assert!(schema.contains(&"IsWeekend".to_string()));
        assert!(schema.contains(&"TimeOfDay_Night".to_string()));
        assert!(schema.contains(&"QueueLength".to_string()));

        // Longer queues predict longer waits.
        let short = pipeline.predict(&flow_observation(10.0, 2.0)).unwrap();
        let long = pipeline.predict(&flow_observation(10.0, 55.0)).unwrap();
        assert!(long > short, "expected {long} > {short}");
    }

    #[test]
    fn resource_pipeline_predicts_for_any_department() {
        let observations: Vec<ResourceObservation> = (0..60)
            .map(|i| ResourceObservation {
                date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap() + chrono::Days::new(i),
                department: RESOURCE_DEPARTMENTS[i as usize % 5].into(),
                outpatient_visits: 200.0 + i as f64,
                inpatient_admissions: 40.0,
                avg_length_of_stay: 3.0,
                staff_available: 20.0,
                is_holiday: false,
            })
            .collect();
        let targets: Vec<f64> = observations
            .iter()
            .map(|o| o.outpatient_visits / 400.0)
            .collect();
        let config = GbmConfig {
            n_trees: 30,
            ..GbmConfig::default()
        };
        let pipeline = ResourcePipeline::fit(&observations, &targets, &config).unwrap();

        // Unknown department one-hots to all zeros and still predicts.
        let mut obs = observations[0].clone();
        obs.department = "Radiology".into();
        assert!(pipeline.predict(&obs).unwrap().is_finite());
    }

    #[test]
    fn scheduling_pipeline_labels_stay_in_range() {
        let observations: Vec<AppointmentObservation> = (0..90)
            .map(|i| AppointmentObservation {
                age: 20.0 + (i % 60) as f64,
                gender: if i % 2 == 0 { "M" } else { "F" }.into(),
                visit_type: if i % 3 == 0 { "New" } else { "Follow-up" }.into(),
                urgency: ["Low", "Medium", "High"][i % 3].into(),
                department: ["Cardiology", "Orthopedics", "Neurology", "General"][i % 4].into(),
            })
            .collect();
        // Urgency fully determines the label here.
        let labels: Vec<ServiceCategory> = observations
            .iter()
            .map(|o| match o.urgency.as_str() {
                "High" => ServiceCategory::Long,
                "Medium" => ServiceCategory::Medium,
                _ => ServiceCategory::Short,
            })
            .collect();
        let config = ForestConfig {
            n_trees: 20,
            ..ForestConfig::default()
        };
        let pipeline = SchedulingPipeline::fit(&observations, &labels, &config).unwrap();

        for obs in &observations {
            let category = pipeline.predict(obs).unwrap();
            assert!(ServiceCategory::ALL.contains(&category));
        }
    }
}
