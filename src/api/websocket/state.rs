//! State shared by the REST handlers and WebSocket connections

use std::sync::Arc;

use tokio::sync::broadcast;

use super::events::FeedMessage;
use super::feed::InventoryFeed;
use crate::bank::BloodBank;
use crate::store::FileStore;

pub struct AppState {
    pub bank: Arc<BloodBank>,
    pub feed: Arc<InventoryFeed>,
}

impl AppState {
    /// Wire `store` to a fresh feed and build the bank over it
    pub fn new(store: FileStore, bcrypt_cost: u32) -> Self {
        let feed = Arc::new(InventoryFeed::new());
        let store = store.with_observer(feed.clone());
        let bank = BloodBank::new(Arc::new(store)).with_bcrypt_cost(bcrypt_cost);

        Self {
            bank: Arc::new(bank),
            feed,
        }
    }

    /// Store revision a snapshot taken now reflects
    pub fn revision(&self) -> u64 {
        self.bank.availability_revision()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedMessage> {
        self.feed.subscribe()
    }
}
