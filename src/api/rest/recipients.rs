//! Recipient request endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{blocking, ApiError, ApiResponse, BloodGroupFilter};
use crate::api::websocket::AppState;
use crate::bank::{BankError, BloodBank};
use crate::types::{NewRecipientRequest, RecipientReceipt};

/// POST /api/recipients - Take a unit for a recipient, 409 when none is left
pub async fn create_recipient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewRecipientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);

    match blocking_request(bank, request).await? {
        Ok(receipt) => {
            let revision = receipt.availability.revision;
            Ok((StatusCode::CREATED, Json(ApiResponse::new(receipt, revision))))
        }
        Err(BankError::Unavailable(key)) => {
            let error = ApiError::from(BankError::Unavailable(key.clone()));
            state.feed.request_rejected(key, state.revision());
            Err(error)
        }
        Err(e) => Err(e.into()),
    }
}

/// Keep `Unavailable` visible to the handler so it reaches the feed
async fn blocking_request(
    bank: Arc<BloodBank>,
    request: NewRecipientRequest,
) -> Result<Result<RecipientReceipt, BankError>, ApiError> {
    blocking(move || Ok(bank.record_recipient_request(request))).await
}

/// GET /api/recipients - Admitted requests, optionally by blood group
pub async fn list_recipients(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BloodGroupFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = Arc::clone(&state.bank);
    let (revision, recipients) = blocking(move || {
        let revision = bank.availability_revision();
        Ok((revision, bank.list_recipients(filter.blood_group.as_deref())?))
    })
    .await?;

    let total = recipients.len();
    Ok(Json(ApiResponse::with_total(recipients, revision, total)))
}
