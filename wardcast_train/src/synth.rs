//! Seeded synthetic datasets mirroring documented hospital patterns:
//! morning/afternoon rushes, Monday/Friday peaks, winter surges, triage
//! priorities, and trailing-week bed occupancy.

use chrono::{Datelike, Days, NaiveDate, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma, Normal, Poisson};
use wardcast_features::encode::{
    FLOW_DEPARTMENTS, GENDERS, PATIENT_TYPES, RESOURCE_DEPARTMENTS, SCHEDULING_DEPARTMENTS,
    URGENCY_LEVELS, VISIT_TYPES,
};
use wardcast_features::{AppointmentObservation, ResourceObservation, WaitingTimeObservation};
use wardcast_model::ServiceCategory;

fn weighted_choice<'a>(rng: &mut StdRng, items: &[&'a str], weights: &[f64]) -> &'a str {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (item, weight) in items.iter().zip(weights) {
        cumulative += weight;
        if roll < cumulative {
            return item;
        }
    }
    items[items.len() - 1]
}

/// Two-hourly arrivals across a year with queue lengths, per-type service
/// times, and the waiting times the regression learns.
pub fn patient_flow(n_samples: usize, seed: u64) -> (Vec<WaitingTimeObservation>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal_noise = Normal::new(0.0, 8.0).unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut observations = Vec::with_capacity(n_samples);
    let mut waits = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        let arrival = start + chrono::Duration::hours(2 * i as i64);
        let hour = f64::from(arrival.hour());
        let day_of_week = f64::from(arrival.weekday().num_days_from_monday());
        let month = f64::from(arrival.month());
        let is_holiday = rng.gen_bool(0.05);

        let patient_type = weighted_choice(&mut rng, &PATIENT_TYPES, &[0.3, 0.5, 0.2]);
        let department = *FLOW_DEPARTMENTS.choose(&mut rng).unwrap();

        let mut base_queue: f64 = 3.0;
        match hour as u32 {
            8..=11 => base_queue += 6.0,
            13..=16 => base_queue += 5.0,
            17..=19 => base_queue += 3.0,
            0..=5 => base_queue -= 2.0,
            _ => {}
        }
        match day_of_week as u32 {
            0 => base_queue += 4.0,
            4 => base_queue += 3.0,
            6 => base_queue -= 1.0,
            _ => {}
        }
        match month as u32 {
            1 | 2 | 12 => base_queue += 2.0,
            6..=8 => base_queue -= 1.0,
            _ => {}
        }
        if is_holiday {
            base_queue += 3.0;
        }
        base_queue = base_queue.max(1.0);
        let queue_length = Poisson::new(base_queue).unwrap().sample(&mut rng).floor();

        let (shape, scale) = match patient_type {
            "Emergency" => (3.0, 5.0),
            "Follow-up" => (2.0, 3.0),
            _ => (2.5, 4.0),
        };
        let service_time = Gamma::new(shape, scale).unwrap().sample(&mut rng);

        let mut wait = queue_length * 7.0;
        match patient_type {
            "Emergency" => wait *= 0.4,
            "Follow-up" => wait *= 0.75,
            _ => {}
        }
        match department {
            "Cardiology" => wait *= 1.2,
            "Orthopedics" => wait *= 1.1,
            _ => {}
        }
        if (0.0..=5.0).contains(&hour) {
            wait *= 1.3;
        }
        wait = (wait + normal_noise.sample(&mut rng)).max(0.0);

        observations.push(WaitingTimeObservation {
            hour,
            day_of_week,
            month,
            queue_length,
            service_time,
            patient_type: patient_type.to_string(),
            department: department.to_string(),
            is_holiday,
        });
        waits.push(wait);
    }

    (observations, waits)
}

/// Consultations with per-urgency service-time bumps; labels are the
/// binned service times the classifier learns.
pub fn appointments(n_samples: usize, seed: u64) -> (Vec<AppointmentObservation>, Vec<ServiceCategory>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let service_gamma = Gamma::new(2.0, 10.0).unwrap();

    let mut observations = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let urgency = weighted_choice(&mut rng, &URGENCY_LEVELS, &[0.6, 0.3, 0.1]);
        let mut service_time = service_gamma.sample(&mut rng);
        match urgency {
            "High" => service_time += 15.0,
            "Medium" => service_time += 5.0,
            _ => {}
        }
        let label = if service_time <= 10.0 {
            ServiceCategory::Short
        } else if service_time <= 20.0 {
            ServiceCategory::Medium
        } else {
            ServiceCategory::Long
        };

        observations.push(AppointmentObservation {
            age: f64::from(rng.gen_range(18..90)),
            gender: (*GENDERS.choose(&mut rng).unwrap()).to_string(),
            visit_type: (*VISIT_TYPES.choose(&mut rng).unwrap()).to_string(),
            urgency: urgency.to_string(),
            department: (*SCHEDULING_DEPARTMENTS.choose(&mut rng).unwrap()).to_string(),
        });
        labels.push(label);
    }

    (observations, labels)
}

/// One daily resource row with both regression targets.
#[derive(Debug, Clone)]
pub struct ResourceRow {
    pub observation: ResourceObservation,
    pub bed_occupancy_rate: f64,
    pub staff_needed: f64,
}

/// Daily department loads; bed occupancy follows trailing-week admissions
/// and stay length, staff need scales available staff by relative
/// outpatient volume.
pub fn resources(n_samples: usize, seed: u64) -> Vec<ResourceRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let outpatient_poisson = Poisson::<f64>::new(235.0).unwrap();
    let inpatient_poisson = Poisson::<f64>::new(50.0).unwrap();
    let stay_gamma = Gamma::new(2.0, 2.0).unwrap();
    let bed_totals: [f64; 5] = [100.0, 150.0, 200.0, 250.0, 300.0];
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

    let mut rows = Vec::with_capacity(n_samples);
    let mut admissions = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        let date = start + Days::new(i as u64);
        let outpatient_visits = outpatient_poisson.sample(&mut rng).floor();
        let inpatient_admissions = inpatient_poisson.sample(&mut rng).floor();
        let staff_available = f64::from(rng.gen_range(10..30));
        let beds_total = *bed_totals.choose(&mut rng).unwrap();
        let avg_length_of_stay = stay_gamma.sample(&mut rng) + 2.0;

        admissions.push(inpatient_admissions);
        let beds_occupied = if i < 7 {
            inpatient_admissions * 0.8
        } else {
            let trailing: f64 = admissions[i - 7..i].iter().sum::<f64>() * 0.8;
            (trailing * avg_length_of_stay / 7.0).min(beds_total * 0.95)
        };

        rows.push(ResourceRow {
            observation: ResourceObservation {
                date,
                department: (*RESOURCE_DEPARTMENTS.choose(&mut rng).unwrap()).to_string(),
                outpatient_visits,
                inpatient_admissions,
                avg_length_of_stay,
                staff_available,
                is_holiday: rng.gen_bool(0.05),
            },
            bed_occupancy_rate: beds_occupied / beds_total,
            staff_needed: 0.0,
        });
    }

    let mean_outpatient = rows
        .iter()
        .map(|r| r.observation.outpatient_visits)
        .sum::<f64>()
        / rows.len() as f64;
    for row in &mut rows {
        row.staff_needed =
            row.observation.staff_available * (row.observation.outpatient_visits / mean_outpatient);
    }

    rows
}
