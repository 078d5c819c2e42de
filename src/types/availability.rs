//! Availability rows: current stock for one blood type at one location

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::new_document_id;

/// Unique key of an availability row
///
/// Matching is exact and case-sensitive on both parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityKey {
    pub blood_type: String,
    pub location: String,
}

impl AvailabilityKey {
    pub fn new(blood_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            blood_type: blood_type.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for AvailabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.blood_type, self.location)
    }
}

/// Derived, mutable stock row keyed by `(blood_type, location)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityAggregate {
    pub id: String,
    pub blood_type: String,
    pub location: String,
    pub available_units: u64,
    /// Contact for this stock; last donor with a phone wins
    #[serde(default)]
    pub phone: String,
    pub updated_at: DateTime<Utc>,
    /// Store revision of the change that last wrote this row
    #[serde(default)]
    pub revision: u64,
}

impl AvailabilityAggregate {
    /// A fresh row holding the first donated unit
    pub fn first_unit(key: &AvailabilityKey, phone: &str) -> Self {
        Self {
            id: new_document_id(),
            blood_type: key.blood_type.clone(),
            location: key.location.clone(),
            available_units: 1,
            phone: phone.to_string(),
            updated_at: Utc::now(),
            revision: 0,
        }
    }

    pub fn key(&self) -> AvailabilityKey {
        AvailabilityKey::new(self.blood_type.clone(), self.location.clone())
    }

    pub fn has_key(&self, key: &AvailabilityKey) -> bool {
        self.blood_type == key.blood_type && self.location == key.location
    }
}
