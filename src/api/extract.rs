//! Request extractors: the bearer-token [`Authenticated`] caller and
//! [`ValidatedJson`] bodies.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::Caller;
use crate::error::BookingError;

/// The authenticated caller of a request.
///
/// Reads `Authorization: Bearer <token>` and resolves it through the
/// [`crate::identity::IdentityProvider`] in [`AppState`].
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub Caller);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = BookingError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                BookingError::Unauthorized("missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            BookingError::Unauthorized(
                "invalid Authorization format, expected: Bearer <token>".to_string(),
            )
        })?;

        let caller = state.identity.resolve(token).await?;
        tracing::debug!(user_id = %caller.user_id(), role = ?caller.role(), "caller resolved");
        Ok(Self(caller))
    }
}

/// JSON request body whose rejections use the [`BookingError`] envelope.
///
/// A missing field, a wrong type, a timestamp with no offset or a missing
/// `Content-Type` becomes [`BookingError::InvalidArgument`] (400, code 1001).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BookingError))]
pub struct ValidatedJson<T>(pub T);
