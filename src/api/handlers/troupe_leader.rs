//! Troupe-leader handlers: book appointments for the leader's troupe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CreateAppointmentRequest, CreateAppointmentResponse};
use crate::api::extract::{Authenticated, ValidatedJson};
use crate::app_state::AppState;
use crate::error::{BookingError, ErrorResponse};

/// `POST /troupeleader/appointments` — Create an appointment.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the caller is a troupe
/// leader, [`BookingError::InvalidArgument`] for an unknown client, and
/// [`BookingError::Conflict`] when the slot is taken.
#[utoipa::path(
    post,
    path = "/api/v1/troupeleader/appointments",
    tag = "Troupe Leaders",
    summary = "Create an appointment",
    description = "Books the caller's troupe for a client at the given time. The new appointment starts as `upcoming`.",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = CreateAppointmentResponse),
        (status = 400, description = "Unknown client or malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not a troupe leader", body = ErrorResponse),
        (status = 409, description = "Slot already booked", body = ErrorResponse),
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    ValidatedJson(req): ValidatedJson<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let appointment = state
        .appointment_service
        .create(&caller, req.client_id, req.scheduled_at)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse::from(appointment)),
    ))
}

/// Troupe-leader routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/troupeleader/appointments", post(create_appointment))
}
