use std::sync::Arc;

use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use wardcast_features::{AppointmentObservation, ResourceObservation, WaitingTimeObservation};
use wardcast_model::{priority_score, ModelStore};

use crate::config::Defaults;
use crate::error::ApiError;

pub struct AppState {
    pub store: ModelStore,
    pub defaults: Defaults,
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/predictwaitingtime", post(predict_waiting_time))
        .route("/api/scheduleappointment", post(schedule_appointment))
        .route("/api/predictresources", post(predict_resources))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaitingTimeRequest {
    hour: f64,
    day_of_week: f64,
    month: f64,
    queue_length: f64,
    service_time: f64,
    patient_type: String,
    department: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaitingTimeResponse {
    waiting_time: f64,
}

// Handlers decode from `Value` themselves so a missing or mistyped field
// lands in the shared error envelope instead of a framework rejection.
async fn predict_waiting_time(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<WaitingTimeResponse>, ApiError> {
    let req: WaitingTimeRequest = serde_json::from_value(body)?;
    let obs = WaitingTimeObservation {
        hour: req.hour,
        day_of_week: req.day_of_week,
        month: req.month,
        queue_length: req.queue_length,
        service_time: req.service_time,
        patient_type: req.patient_type,
        department: req.department,
        is_holiday: state.defaults.assume_holiday,
    };
    let waiting_time = state.store.waiting_time.predict(&obs)?;
    Ok(Json(WaitingTimeResponse { waiting_time }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentRequest {
    age: f64,
    gender: String,
    visit_type: String,
    urgency: String,
    department: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentResponse {
    service_category: String,
    priority_score: u32,
}

async fn schedule_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let req: AppointmentRequest = serde_json::from_value(body)?;
    let obs = AppointmentObservation {
        age: req.age,
        gender: req.gender,
        visit_type: req.visit_type,
        urgency: req.urgency.clone(),
        department: req.department,
    };
    let category = state.store.scheduling.predict(&obs)?;
    let priority = priority_score(&req.urgency, category)?;
    Ok(Json(AppointmentResponse {
        service_category: category.as_str().to_string(),
        priority_score: priority,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceRequest {
    date: String,
    department: String,
    outpatient_visits: f64,
    inpatient_admissions: f64,
    avg_length_of_stay: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceResponse {
    bed_occupancy_rate: f64,
    staff_needed: i64,
}

async fn predict_resources(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let req: ResourceRequest = serde_json::from_value(body)?;
    let date = NaiveDate::parse_from_str(&req.date, "%Y-%m-%d")?;
    let obs = ResourceObservation {
        date,
        department: req.department,
        outpatient_visits: req.outpatient_visits,
        inpatient_admissions: req.inpatient_admissions,
        avg_length_of_stay: req.avg_length_of_stay,
        staff_available: state.defaults.staff_available,
        is_holiday: state.defaults.assume_holiday,
    };
    let bed_occupancy_rate = state.store.bed_occupancy.predict(&obs)?;
    // Truncated, not rounded.
    let staff_needed = state.store.staff_needed.predict(&obs)?.trunc() as i64;
    Ok(Json(ResourceResponse {
        bed_occupancy_rate,
        staff_needed,
    }))
}
