//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses of the form
//! `{"error": "<message>"}`. Client errors carry a fixed, user-facing message;
//! infrastructure failures are logged here and answered with a generic 500.

use crate::errors::ServiceError;
use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Converts ServiceError to appropriate HTTP response.
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let status = match &error {
        ServiceError::InvalidFormat
        | ServiceError::WeakPassword { .. }
        | ServiceError::PasswordTooLong { .. }
        | ServiceError::DuplicateUsername => StatusCode::BAD_REQUEST,
        ServiceError::InvalidCredentials | ServiceError::InvalidToken => StatusCode::UNAUTHORIZED,
        ServiceError::Hashing { .. }
        | ServiceError::Persistence { .. }
        | ServiceError::Signing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if error.is_internal() {
        tracing::error!("Request failed: {}", error);
        return (status, Json(ErrorResponse::new("Internal server error")));
    }

    (status, Json(ErrorResponse::new(error.to_string())))
}
