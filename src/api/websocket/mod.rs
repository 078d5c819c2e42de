//! WebSocket module for live availability updates
//!
//! Provides the `/ws` endpoint. Every committed inventory change is sent
//! with the store revision it produced, so a client can take a snapshot
//! from `/api/availability`, then apply only feed changes with a higher
//! `sequenceId`, and spot gaps.

pub mod events;
pub mod feed;
pub mod handler;
pub mod state;

pub use events::{ClientMessage, FeedMessage, InventoryEvent};
pub use feed::InventoryFeed;
pub use state::AppState;
