//! Deterministic encoding of raw request fields into feature columns.
//!
//! Periodic integers become sine/cosine pairs so values adjacent across the
//! wrap-around point (23:00 and 00:00) stay numerically close. Categorical
//! fields expand into one binary indicator per known category; an unknown
//! category value leaves every indicator at zero rather than failing.

use std::f64::consts::PI;

use crate::observation::{ResourceObservation, WaitingTimeObservation};
use crate::vector::FeatureVector;

pub const PATIENT_TYPES: [&str; 3] = ["Emergency", "Routine", "Follow-up"];
pub const FLOW_DEPARTMENTS: [&str; 5] = [
    "General",
    "Cardiology",
    "Orthopedics",
    "Pediatrics",
    "OB-GYN",
];
pub const RESOURCE_DEPARTMENTS: [&str; 5] = [
    "Emergency",
    "Surgery",
    "Internal Medicine",
    "Pediatrics",
    "Obstetrics",
];
pub const TIME_OF_DAY: [&str; 4] = ["Night", "Morning", "Afternoon", "Evening"];

// Scheduling categoricals are expanded inside the model's own encoding
// stage rather than here; these sets exist for data generation and docs.
pub const SCHEDULING_DEPARTMENTS: [&str; 4] =
    ["Cardiology", "Orthopedics", "Neurology", "General"];
pub const GENDERS: [&str; 2] = ["M", "F"];
pub const VISIT_TYPES: [&str; 2] = ["New", "Follow-up"];
pub const URGENCY_LEVELS: [&str; 3] = ["Low", "Medium", "High"];

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_WEEK: f64 = 7.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Stand-in values for data the system does not source yet. Kept as named
/// defaults so real feeds can replace them without touching encode logic.
pub const DEFAULT_STAFF_AVAILABLE: f64 = 20.0;
pub const ASSUME_HOLIDAY: bool = false;

/// Sine/cosine pair for a periodic value. Total over all of `f64`; callers
/// are responsible for pre-validating nominal ranges.
pub fn cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

/// Emit one `Field_Category` indicator per known category. An unrecognized
/// `value` sets every indicator to zero.
pub fn one_hot(out: &mut FeatureVector, field: &str, value: &str, categories: &[&str]) {
    for category in categories {
        let indicator = if *category == value { 1.0 } else { 0.0 };
        out.insert(&format!("{field}_{category}"), indicator);
    }
}

fn insert_cyclic(out: &mut FeatureVector, field: &str, value: f64, period: f64) {
    let (sin, cos) = cyclic(value, period);
    out.insert(&format!("{field}_sin"), sin);
    out.insert(&format!("{field}_cos"), cos);
}

/// Columns produced for a waiting-time request at serving time.
///
/// The trained model's schema is a superset (it adds weekend and
/// time-of-day columns); alignment fills the gap with zeros.
pub fn waiting_time_features(obs: &WaitingTimeObservation) -> FeatureVector {
    let mut v = FeatureVector::with_capacity(17);
    insert_cyclic(&mut v, "Hour", obs.hour, HOURS_PER_DAY);
    insert_cyclic(&mut v, "DayOfWeek", obs.day_of_week, DAYS_PER_WEEK);
    insert_cyclic(&mut v, "Month", obs.month, MONTHS_PER_YEAR);
    v.insert("IsHoliday", if obs.is_holiday { 1.0 } else { 0.0 });
    v.insert("QueueLength", obs.queue_length);
    v.insert("ServiceTime", obs.service_time);
    one_hot(&mut v, "PatientType", &obs.patient_type, &PATIENT_TYPES);
    one_hot(&mut v, "Department", &obs.department, &FLOW_DEPARTMENTS);
    v
}

/// Columns produced for a resource request. Raw `Month`/`DayOfWeek` are
/// emitted alongside their cyclic pairs; the model schema keeps only the
/// cyclic ones, so alignment drops the raw columns.
pub fn resource_features(obs: &ResourceObservation) -> FeatureVector {
    let mut v = FeatureVector::with_capacity(17);
    v.insert("Month", obs.month());
    v.insert("Year", obs.year());
    v.insert("DayOfWeek", obs.day_of_week());
    v.insert("IsHoliday", if obs.is_holiday { 1.0 } else { 0.0 });
    one_hot(&mut v, "Department", &obs.department, &RESOURCE_DEPARTMENTS);
    v.insert("OutpatientVisits", obs.outpatient_visits);
    v.insert("InpatientAdmissions", obs.inpatient_admissions);
    v.insert("StaffAvailable", obs.staff_available);
    v.insert("AvgLengthOfStay", obs.avg_length_of_stay);
    insert_cyclic(&mut v, "Month", obs.month(), MONTHS_PER_YEAR);
    insert_cyclic(&mut v, "DayOfWeek", obs.day_of_week(), DAYS_PER_WEEK);
    v
}

/// 1.0 for Saturday/Sunday under the Monday = 0 convention.
pub fn is_weekend(day_of_week: f64) -> f64 {
    if day_of_week >= 5.0 {
        1.0
    } else {
        0.0
    }
}

pub fn time_of_day(hour: f64) -> &'static str {
    if (0.0..6.0).contains(&hour) {
        "Night"
    } else if (6.0..12.0).contains(&hour) {
        "Morning"
    } else if (12.0..18.0).contains(&hour) {
        "Afternoon"
    } else {
        "Evening"
    }
}
