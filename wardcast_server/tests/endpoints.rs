use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wardcast_features::ResourceObservation;
use wardcast_model::{
    ForestConfig, GbmConfig, ModelStore, ResourcePipeline, SchedulingPipeline, ServiceCategory,
    WaitingTimePipeline,
};
use wardcast_server::config::Defaults;
use wardcast_server::routes::{app, AppState};
use wardcast_train::synth;

// Small but real models: trained in-test on the same generators the
// offline binaries use, just with fewer rounds.
fn test_state() -> Arc<AppState> {
    let gbm = GbmConfig {
        n_trees: 25,
        ..GbmConfig::default()
    };
    let forest = ForestConfig {
        n_trees: 10,
        max_depth: 6,
        ..ForestConfig::default()
    };

    let (flow_obs, waits) = synth::patient_flow(200, 42);
    let waiting_time = WaitingTimePipeline::fit(&flow_obs, &waits, &gbm).unwrap();

    let (appt_obs, labels) = synth::appointments(200, 42);
    let scheduling = SchedulingPipeline::fit(&appt_obs, &labels, &forest).unwrap();

    let rows = synth::resources(120, 42);
    let observations: Vec<_> = rows.iter().map(|r| r.observation.clone()).collect();
    let beds: Vec<f64> = rows.iter().map(|r| r.bed_occupancy_rate).collect();
    let staff: Vec<f64> = rows.iter().map(|r| r.staff_needed).collect();
    let bed_occupancy = ResourcePipeline::fit(&observations, &beds, &gbm).unwrap();
    let staff_needed = ResourcePipeline::fit(&observations, &staff, &gbm).unwrap();

    Arc::new(AppState {
        store: ModelStore {
            waiting_time,
            scheduling,
            bed_occupancy,
            staff_needed,
        },
        defaults: Defaults::default(),
    })
}

async fn post(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_answers_ok() {
    let response = app(test_state())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn waiting_time_returns_a_number() {
    let (status, body) = post(
        test_state(),
        "/api/predictwaitingtime",
        json!({
            "hour": 14,
            "dayOfWeek": 2,
            "month": 3,
            "queueLength": 5,
            "serviceTime": 10,
            "patientType": "Routine",
            "department": "General"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let waiting_time = body["waitingTime"].as_f64().unwrap();
    assert!(waiting_time.is_finite());
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn scheduling_returns_category_and_consistent_priority() {
    let (status, body) = post(
        test_state(),
        "/api/scheduleappointment",
        json!({
            "age": 65,
            "gender": "M",
            "visitType": "New",
            "urgency": "High",
            "department": "Cardiology"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let category: ServiceCategory = body["serviceCategory"].as_str().unwrap().parse().unwrap();
    let priority = body["priorityScore"].as_u64().unwrap() as u32;
    // High urgency weighs 3; the score is that times the category weight.
    assert_eq!(priority, 3 * category.weight());
}

#[tokio::test]
async fn resources_returns_rate_and_truncated_staff_count() {
    let state = test_state();
    let (status, body) = post(
        state.clone(),
        "/api/predictresources",
        json!({
            "date": "2023-05-15",
            "department": "Emergency",
            "outpatientVisits": 250,
            "inpatientAdmissions": 45,
            "avgLengthOfStay": 3.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["bedOccupancyRate"].as_f64().unwrap().is_finite());
    let staff_needed = body["staffNeeded"].as_i64().unwrap();

    // The integer is the raw regression output truncated, not rounded.
    let obs = ResourceObservation {
        date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
        department: "Emergency".into(),
        outpatient_visits: 250.0,
        inpatient_admissions: 45.0,
        avg_length_of_stay: 3.5,
        staff_available: state.defaults.staff_available,
        is_holiday: state.defaults.assume_holiday,
    };
    let raw = state.store.staff_needed.predict(&obs).unwrap();
    assert_eq!(staff_needed, raw.trunc() as i64);
}

#[tokio::test]
async fn missing_field_yields_error_envelope() {
    let (status, body) = post(
        test_state(),
        "/api/predictwaitingtime",
        json!({
            "hour": 14,
            "dayOfWeek": 2,
            "month": 3,
            "queueLength": 5,
            "patientType": "Routine",
            "department": "General"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("serviceTime"), "unexpected error: {message}");
}

#[tokio::test]
async fn unknown_urgency_yields_error_envelope() {
    let (status, body) = post(
        test_state(),
        "/api/scheduleappointment",
        json!({
            "age": 40,
            "gender": "F",
            "visitType": "Follow-up",
            "urgency": "Critical",
            "department": "General"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Critical"));
}

#[tokio::test]
async fn unknown_categories_are_tolerated() {
    // An unrecognized patient type one-hots to all zeros; the request
    // still succeeds.
    let (status, body) = post(
        test_state(),
        "/api/predictwaitingtime",
        json!({
            "hour": 9,
            "dayOfWeek": 0,
            "month": 12,
            "queueLength": 8,
            "serviceTime": 12,
            "patientType": "Walk-in",
            "department": "Telemetry"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["waitingTime"].is_number());
}
