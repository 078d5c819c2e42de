//! Donation endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{blocking, ApiError, ApiResponse, BloodGroupFilter};
use crate::api::websocket::AppState;
use crate::types::NewDonation;

/// POST /api/donations - Record a donation and add its unit to stock
///
/// The feed hears about the change from the store; the response carries
/// the revision the change produced.
pub async fn create_donation(
    State(state): State<Arc<AppState>>,
    Json(donation): Json<NewDonation>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    let receipt = blocking(move || bank.record_donation(donation)).await?;

    let revision = receipt.availability.revision;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(receipt, revision))))
}

/// GET /api/donations - Donation log, optionally by blood group
pub async fn list_donations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BloodGroupFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    let (revision, donations) = blocking(move || {
        let revision = bank.availability_revision();
        Ok((revision, bank.list_donations(filter.blood_group.as_deref())?))
    })
    .await?;

    let total = donations.len();
    Ok(Json(ApiResponse::with_total(donations, revision, total)))
}
