//! API module for HTTP and WebSocket endpoints
//!
//! REST endpoints for the donor registry, donations, recipient requests and
//! availability, plus a WebSocket feed of inventory changes.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::{AppState, InventoryEvent, InventoryFeed};
