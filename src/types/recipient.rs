//! Recipient request events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_document_id, AvailabilityAggregate, AvailabilityKey};

/// Recipient request as received from a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipientRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub location: String,
}

impl NewRecipientRequest {
    pub fn new(
        name: impl Into<String>,
        blood_group: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            blood_group: blood_group.into(),
            location: location.into(),
        }
    }

    pub fn key(&self) -> AvailabilityKey {
        AvailabilityKey::new(self.blood_group.clone(), self.location.clone())
    }
}

/// Immutable log entry for an admitted recipient request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientEvent {
    pub id: String,
    pub name: String,
    pub blood_group: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl From<NewRecipientRequest> for RecipientEvent {
    fn from(request: NewRecipientRequest) -> Self {
        Self {
            id: new_document_id(),
            name: request.name,
            blood_group: request.blood_group,
            location: request.location,
            timestamp: Utc::now(),
        }
    }
}

/// Result of an admitted recipient request
#[derive(Debug, Clone, Serialize)]
pub struct RecipientReceipt {
    pub event: RecipientEvent,
    pub availability: AvailabilityAggregate,
}
