//! Donation events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_document_id, AvailabilityAggregate, AvailabilityKey};

/// Donation submission as received from a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
}

impl NewDonation {
    pub fn new(
        name: impl Into<String>,
        blood_group: impl Into<String>,
        location: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            blood_group: blood_group.into(),
            location: location.into(),
            phone: phone.into(),
        }
    }

    pub fn key(&self) -> AvailabilityKey {
        AvailabilityKey::new(self.blood_group.clone(), self.location.clone())
    }
}

/// Immutable donation log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEvent {
    pub id: String,
    pub name: String,
    pub blood_group: String,
    pub location: String,
    pub phone: String,
    pub timestamp: DateTime<Utc>,
}

impl From<NewDonation> for DonationEvent {
    fn from(donation: NewDonation) -> Self {
        Self {
            id: new_document_id(),
            name: donation.name,
            blood_group: donation.blood_group,
            location: donation.location,
            phone: donation.phone,
            timestamp: Utc::now(),
        }
    }
}

/// Result of an admitted donation
#[derive(Debug, Clone, Serialize)]
pub struct DonationReceipt {
    pub event: DonationEvent,
    pub availability: AvailabilityAggregate,
}
