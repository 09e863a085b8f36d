//! Booking error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid argument: the status you provided is not valid",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                      |
/// |-----------|-------------------|----------------------------------|
/// | 1000–1999 | Request / Access  | 400 / 401 / 403                  |
/// | 2000–2999 | State             | 404 Not Found / 409 Conflict     |
/// | 3000–3999 | Server            | 500 Internal Server Error        |
///
/// `NotFound` is also returned when a record exists but lies outside the
/// caller's scope, so the two cases cannot be told apart.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Malformed input, such as an unrecognized status value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing, malformed, or expired credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's role does not permit the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A scoped lookup returned no record.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation on appointment creation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidArgument(_) => 1001,
            Self::Unauthorized(_) => 1401,
            Self::Forbidden(_) => 1403,
            Self::NotFound(_) => 2001,
            Self::Conflict(_) => 2009,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for the "appointment not found" lookup failure.
    #[must_use]
    pub fn appointment_not_found() -> Self {
        Self::NotFound("the appointment requested does not exist".to_string())
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Persistence(msg) | Self::Internal(msg) => {
                tracing::error!(error = %msg, code = self.error_code(), "request failed");
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message,
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
