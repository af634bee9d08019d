use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Service-time category predicted for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    Short,
    Medium,
    Long,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Short,
        ServiceCategory::Medium,
        ServiceCategory::Long,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Short => "Short",
            ServiceCategory::Medium => "Medium",
            ServiceCategory::Long => "Long",
        }
    }

    /// Class index used by the classifier.
    pub fn index(self) -> usize {
        match self {
            ServiceCategory::Short => 0,
            ServiceCategory::Medium => 1,
            ServiceCategory::Long => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn weight(self) -> u32 {
        match self {
            ServiceCategory::Short => 1,
            ServiceCategory::Medium => 2,
            ServiceCategory::Long => 3,
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Short" => Ok(ServiceCategory::Short),
            "Medium" => Ok(ServiceCategory::Medium),
            "Long" => Ok(ServiceCategory::Long),
            other => Err(ModelError::UnknownCategory(other.to_string())),
        }
    }
}

pub fn urgency_weight(urgency: &str) -> Result<u32, ModelError> {
    match urgency {
        "Low" => Ok(1),
        "Medium" => Ok(2),
        "High" => Ok(3),
        other => Err(ModelError::UnknownUrgency(other.to_string())),
    }
}

/// Priority = urgency weight × predicted-category weight.
pub fn priority_score(urgency: &str, category: ServiceCategory) -> Result<u32, ModelError> {
    Ok(urgency_weight(urgency)? * category.weight())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_the_product_of_both_weights() {
        assert_eq!(priority_score("High", ServiceCategory::Long).unwrap(), 9);
        assert_eq!(priority_score("Low", ServiceCategory::Short).unwrap(), 1);
        assert_eq!(priority_score("Medium", ServiceCategory::Long).unwrap(), 6);
    }

    #[test]
    fn unknown_urgency_is_an_error() {
        assert!(matches!(
            priority_score("Critical", ServiceCategory::Short),
            Err(ModelError::UnknownUrgency(_))
        ));
    }

    #[test]
    fn index_round_trip() {
        for category in ServiceCategory::ALL {
            assert_eq!(ServiceCategory::from_index(category.index()), Some(category));
        }
        assert_eq!(ServiceCategory::from_index(3), None);
    }

    #[test]
    fn parses_from_label() {
        assert_eq!("Long".parse::<ServiceCategory>().unwrap(), ServiceCategory::Long);
        assert!("long".parse::<ServiceCategory>().is_err());
    }
}
