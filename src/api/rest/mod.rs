//! REST API module for HTTP endpoints
//!
//! - `POST /api/users/register` - Register a donor
//! - `POST /api/users/login` - Check donor credentials
//! - `GET /api/users/donors` - List donors
//! - `DELETE /api/users/delete/:id` - Remove a donor
//! - `POST /api/donations` / `GET /api/donations` - Donation log
//! - `POST /api/recipients` / `GET /api/recipients` - Recipient requests
//! - `GET /api/availability` - Current stock per blood type and location

pub mod availability;
pub mod donations;
pub mod donors;
pub mod recipients;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::bank::BankError;

/// Blood group filter shared by the event listings
#[derive(Debug, Default, Deserialize)]
pub struct BloodGroupFilter {
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
}

/// Response wrapper for the event and stock endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Store revision the data reflects; feed messages above it are newer
    pub sequence_id: u64,
    /// Total count (for list responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, sequence_id: u64) -> Self {
        Self {
            data,
            sequence_id,
            total: None,
        }
    }

    pub fn with_total(data: T, sequence_id: u64, total: usize) -> Self {
        Self {
            data,
            sequence_id,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
            code: code.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn conflict(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl From<BankError> for ApiError {
    fn from(e: BankError) -> Self {
        match e {
            BankError::Validation(e) => ApiError::bad_request(e.to_string()),
            BankError::Unavailable(_) => ApiError::conflict("UNAVAILABLE", e.to_string()),
            BankError::EmailTaken(_) => ApiError::conflict("EMAIL_TAKEN", e.to_string()),
            BankError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
            BankError::NotFound(_) => ApiError::not_found(e.to_string()),
            BankError::Hash(_) | BankError::Persistence(_) => {
                // Store details stay in the log
                error!(error = %e, "request failed");
                ApiError::internal("internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Run bank work that blocks (bcrypt, fsync) off the async workers
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, BankError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            error!(error = %e, "blocking task failed");
            Err(ApiError::internal("internal server error"))
        }
    }
}
