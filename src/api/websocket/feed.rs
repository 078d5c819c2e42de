//! Inventory feed: store changes fanned out to WebSocket clients
//!
//! The feed is the store's [`AvailabilityObserver`], so a change is sent
//! while the store still holds its lock and messages leave in revision
//! order. A message's `sequenceId` is the store revision it reflects.
//! Change messages carry consecutive revisions; a rejection carries the
//! revision current when it was seen and does not advance it.

use tokio::sync::broadcast;

use super::events::{FeedMessage, InventoryEvent};
use crate::inventory::Delta;
use crate::store::AvailabilityObserver;
use crate::types::{AvailabilityAggregate, AvailabilityKey};

/// Buffered messages per client before it is told it lagged
const FEED_CAPACITY: usize = 1024;

pub struct InventoryFeed {
    tx: broadcast::Sender<FeedMessage>,
}

impl InventoryFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedMessage> {
        self.tx.subscribe()
    }

    /// Tell clients a recipient request found no stock for `key`
    pub fn request_rejected(&self, key: AvailabilityKey, revision: u64) {
        self.send(InventoryEvent::RequestRejected { key }, revision);
    }

    fn send(&self, event: InventoryEvent, sequence_id: u64) {
        let msg = FeedMessage {
            event,
            sequence_id,
            timestamp: chrono::Utc::now().timestamp(),
        };
        // No subscribers is fine
        let _ = self.tx.send(msg);
    }
}

impl Default for InventoryFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityObserver for InventoryFeed {
    fn availability_committed(&self, row: &AvailabilityAggregate, cause: Delta) {
        self.send(
            InventoryEvent::AvailabilityChanged {
                payload: row.clone(),
                cause,
            },
            row.revision,
        );
    }
}
