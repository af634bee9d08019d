use chrono::{Datelike, NaiveDate};

/// Raw inputs for a waiting-time prediction.
///
/// Periodic fields are trusted to lie within their nominal ranges; the
/// cyclic encoding is total, so out-of-range values encode without error.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingTimeObservation {
    pub hour: f64,
    pub day_of_week: f64,
    pub month: f64,
    pub queue_length: f64,
    pub service_time: f64,
    pub patient_type: String,
    pub department: String,
    /// Not caller-overridable over HTTP; the server fills this from its
    /// configured default until a calendar source exists.
    pub is_holiday: bool,
}

/// Raw inputs for an appointment service-time classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentObservation {
    pub age: f64,
    pub gender: String,
    pub visit_type: String,
    pub urgency: String,
    pub department: String,
}

/// Raw inputs for a bed/staff resource prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceObservation {
    pub date: NaiveDate,
    pub department: String,
    pub outpatient_visits: f64,
    pub inpatient_admissions: f64,
    pub avg_length_of_stay: f64,
    /// Placeholder until a real staffing feed exists; the server fills
    /// this from its configured default.
    pub staff_available: f64,
    pub is_holiday: bool,
}

impl ResourceObservation {
    pub fn month(&self) -> f64 {
        f64::from(self.date.month())
    }

    pub fn year(&self) -> f64 {
        f64::from(self.date.year())
    }

    /// Day of week with Monday = 0, matching the convention the models
    /// were trained under.
    pub fn day_of_week(&self) -> f64 {
        f64::from(self.date.weekday().num_days_from_monday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_calendar_fields() {
        let obs = ResourceObservation {
            date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
            department: "Emergency".into(),
            outpatient_visits: 250.0,
            inpatient_admissions: 45.0,
            avg_length_of_stay: 3.5,
            staff_available: 20.0,
            is_holiday: false,
        };
        assert_eq!(obs.month(), 5.0);
        assert_eq!(obs.year(), 2023.0);
        // 2023-05-15 was a Monday.
        assert_eq!(obs.day_of_week(), 0.0);
    }
}
