//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{availability, donations, donors, recipients};
use super::websocket::{handler::ws_handler, AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // The frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // Donor registry
        .route("/api/users/register", post(donors::register))
        .route("/api/users/login", post(donors::login))
        .route("/api/users/donors", get(donors::list_donors))
        .route("/api/users/delete/:id", delete(donors::delete_donor))
        // Events and stock
        .route(
            "/api/donations",
            post(donations::create_donation).get(donations::list_donations),
        )
        .route(
            "/api/recipients",
            post(recipients::create_recipient).get(recipients::list_recipients),
        )
        .route("/api/availability", get(availability::list_availability))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
