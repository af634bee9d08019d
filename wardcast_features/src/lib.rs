//! Feature encoding for hospital operations prediction.
//!
//! Raw request fields (periodic integers, categorical strings, numeric
//! passthroughs) are turned into ordered numeric feature vectors, then
//! reconciled against the feature schema a trained model declares.

pub mod align;
pub mod encode;
pub mod observation;
pub mod vector;

pub use align::align;
pub use observation::{AppointmentObservation, ResourceObservation, WaitingTimeObservation};
pub use vector::FeatureVector;
