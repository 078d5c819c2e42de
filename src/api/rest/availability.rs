//! Availability endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{blocking, ApiError, ApiResponse};
use crate::api::websocket::AppState;

/// Query parameters for listing availability
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    /// Exact blood type, e.g. `O+`
    #[serde(rename = "bloodType")]
    pub blood_type: Option<String>,
}

/// GET /api/availability - Current stock rows
pub async fn list_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    let (revision, rows) = blocking(move || {
        // Revision first: rows may be newer, never older
        let revision = bank.availability_revision();
        Ok((revision, bank.list_availability(params.blood_type.as_deref())?))
    })
    .await?;

    let total = rows.len();
    Ok(Json(ApiResponse::with_total(rows, revision, total)))
}
