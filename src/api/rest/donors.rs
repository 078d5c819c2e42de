//! Donor registry endpoints
//!
//! These keep the plain shapes the web frontend reads: the donor list is a
//! bare JSON array, registration returns the bare donor, and a failed login
//! is `200 {"success": false}`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::{blocking, ApiError};
use crate::api::websocket::AppState;
use crate::bank::BankError;
use crate::types::{Donor, LoginRequest, NewDonor};

/// Response for POST /api/users/login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor: Option<Donor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/users/register - Register a donor
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewDonor>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    let donor = blocking(move || bank.register_donor(form)).await?;
    Ok((StatusCode::CREATED, Json(donor)))
}

/// POST /api/users/login - Check credentials
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let bank = Arc::clone(&state.bank);

    let outcome = blocking(move || match bank.login(form) {
        Err(BankError::InvalidCredentials) => Ok(None),
        other => other.map(Some),
    })
    .await?;

    Ok(Json(match outcome {
        Some(donor) => LoginResponse {
            success: true,
            donor: Some(donor),
            error: None,
        },
        None => LoginResponse {
            success: false,
            donor: None,
            error: Some("Invalid email or password".to_string()),
        },
    }))
}

/// GET /api/users/donors - All registered donors
pub async fn list_donors(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Donor>>, ApiError> {
    let bank = Arc::clone(&state.bank);
    let donors = blocking(move || bank.list_donors()).await?;
    Ok(Json(donors))
}

/// DELETE /api/users/delete/:id - Remove a donor
pub async fn delete_donor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    blocking(move || bank.delete_donor(&id)).await?;
    Ok(Json(json!({ "message": "Donor deleted successfully" })))
}
