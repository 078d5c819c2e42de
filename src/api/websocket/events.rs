//! WebSocket message types for the live availability feed

use serde::{Deserialize, Serialize};

use crate::inventory::Delta;
use crate::types::{AvailabilityAggregate, AvailabilityKey};

/// Inventory events broadcast to WebSocket clients
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryEvent {
    /// A donation or admitted request changed a row
    AvailabilityChanged {
        payload: AvailabilityAggregate,
        cause: Delta,
    },

    /// A recipient request found no stock
    RequestRejected { key: AvailabilityKey },
}

impl InventoryEvent {
    /// Blood type the event concerns, for subscription filters
    pub fn blood_type(&self) -> &str {
        match self {
            InventoryEvent::AvailabilityChanged { payload, .. } => &payload.blood_type,
            InventoryEvent::RequestRejected { key } => &key.blood_type,
        }
    }
}

/// Feed message wrapper with metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMessage {
    #[serde(flatten)]
    pub event: InventoryEvent,

    /// Store revision the message reflects
    pub sequence_id: u64,

    /// Unix timestamp when event was created
    pub timestamp: i64,
}

/// Client message types
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Restrict the feed to one blood type (None clears the filter)
    Subscribe {
        #[serde(default, rename = "bloodType")]
        blood_type: Option<String>,
    },

    /// Keepalive
    Ping,
}

/// Sent once on connect
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub sequence_id: u64,
    pub server_version: String,
}

impl WelcomeMessage {
    pub fn new(sequence_id: u64) -> Self {
        Self {
            msg_type: "welcome".to_string(),
            sequence_id,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Reply to a client ping
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PongMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub timestamp: i64,
}

impl Default for PongMessage {
    fn default() -> Self {
        Self {
            msg_type: "pong".to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
