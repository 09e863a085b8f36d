//! Client handlers: list, view and rate own appointments.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ClientAppointmentView, RateAppointmentRequest};
use crate::api::extract::{Authenticated, ValidatedJson};
use crate::app_state::AppState;
use crate::domain::{AppointmentId, TimeFilter};
use crate::error::{BookingError, ErrorResponse};

async fn list_filtered(
    state: &AppState,
    caller: &crate::domain::Caller,
    filter: TimeFilter,
) -> Result<Json<Vec<ClientAppointmentView>>, BookingError> {
    let appointments = state
        .appointment_service
        .list_for_client(caller, filter)
        .await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(ClientAppointmentView::from)
            .collect(),
    ))
}

/// `GET /clients/appointments` — List all of the caller's appointments.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the caller is a client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/appointments",
    tag = "Clients",
    summary = "List own appointments",
    description = "Returns every appointment owned by the calling client, latest first.",
    responses(
        (status = 200, description = "Appointment list", body = Vec<ClientAppointmentView>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a client", body = ErrorResponse),
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<impl IntoResponse, BookingError> {
    list_filtered(&state, &caller, TimeFilter::All).await
}

/// `GET /clients/appointments/upcoming` — List appointments at or after now.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the caller is a client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/appointments/upcoming",
    tag = "Clients",
    summary = "List upcoming appointments",
    description = "Returns the calling client's appointments scheduled at or after the current time, latest first.",
    responses(
        (status = 200, description = "Appointment list", body = Vec<ClientAppointmentView>),
        (status = 403, description = "Caller is not a client", body = ErrorResponse),
    )
)]
pub async fn list_upcoming(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<impl IntoResponse, BookingError> {
    list_filtered(&state, &caller, TimeFilter::Upcoming).await
}

/// `GET /clients/appointments/past` — List appointments before now.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the caller is a client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/appointments/past",
    tag = "Clients",
    summary = "List past appointments",
    description = "Returns the calling client's appointments scheduled before the current time, latest first.",
    responses(
        (status = 200, description = "Appointment list", body = Vec<ClientAppointmentView>),
        (status = 403, description = "Caller is not a client", body = ErrorResponse),
    )
)]
pub async fn list_past(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<impl IntoResponse, BookingError> {
    list_filtered(&state, &caller, TimeFilter::Past).await
}

/// `GET /clients/appointments/{id}` — View one own appointment.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] if the appointment is missing or
/// belongs to another client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/appointments/{id}",
    tag = "Clients",
    summary = "Get own appointment",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    responses(
        (status = 200, description = "Appointment", body = ClientAppointmentView),
        (status = 403, description = "Caller is not a client", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let detail = state
        .appointment_service
        .get_for_client(&caller, AppointmentId::from_uuid(id))
        .await?;
    Ok(Json(ClientAppointmentView::from(detail)))
}

/// `PATCH /clients/appointments/{id}` — Rate one own appointment.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] if the appointment is missing or
/// belongs to another client, and [`BookingError::InvalidArgument`] if the
/// rating is too long.
#[utoipa::path(
    patch,
    path = "/api/v1/clients/appointments/{id}",
    tag = "Clients",
    summary = "Rate own appointment",
    description = "Partial update: only the rating changes.",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    request_body = RateAppointmentRequest,
    responses(
        (status = 200, description = "Updated appointment", body = ClientAppointmentView),
        (status = 400, description = "Invalid rating", body = ErrorResponse),
        (status = 403, description = "Caller is not a client", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn rate_appointment(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<uuid::Uuid>,
    ValidatedJson(req): ValidatedJson<RateAppointmentRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let detail = state
        .appointment_service
        .rate(&caller, AppointmentId::from_uuid(id), req.rating)
        .await?;
    Ok(Json(ClientAppointmentView::from(detail)))
}

/// Client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/appointments", get(list_appointments))
        .route("/clients/appointments/upcoming", get(list_upcoming))
        .route("/clients/appointments/past", get(list_past))
        .route(
            "/clients/appointments/{id}",
            get(get_appointment).patch(rate_appointment),
        )
}
