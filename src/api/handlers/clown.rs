//! Clown handlers: troupe appointments, status updates, issues and
//! client-details requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ClientDetailsRequestBody, ClownAppointmentView, IssueResponse, RaiseIssueRequest,
    UpdateStatusRequest,
};
use crate::api::extract::{Authenticated, ValidatedJson};
use crate::app_state::AppState;
use crate::domain::{AppointmentId, ClientContact};
use crate::error::{BookingError, ErrorResponse};

/// `GET /clowns/appointments` — List the caller's troupe appointments.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the caller is a clown.
#[utoipa::path(
    get,
    path = "/api/v1/clowns/appointments",
    tag = "Clowns",
    summary = "List troupe appointments",
    description = "Returns every appointment booked for the calling clown's troupe, latest first. Clients appear by name only.",
    responses(
        (status = 200, description = "Appointment list", body = Vec<ClownAppointmentView>),
        (status = 403, description = "Caller is not a clown", body = ErrorResponse),
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<impl IntoResponse, BookingError> {
    let appointments = state.appointment_service.list_for_clown(&caller).await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(ClownAppointmentView::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /clowns/appointments/{id}` — View one troupe appointment.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] if the appointment is missing or
/// booked for another troupe.
#[utoipa::path(
    get,
    path = "/api/v1/clowns/appointments/{id}",
    tag = "Clowns",
    summary = "Get troupe appointment",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    responses(
        (status = 200, description = "Appointment", body = ClownAppointmentView),
        (status = 403, description = "Caller is not a clown", body = ErrorResponse),
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
        .get_for_clown(&caller, AppointmentId::from_uuid(id))
        .await?;
    Ok(Json(ClownAppointmentView::from(detail)))
}

/// `PATCH /clowns/appointments/{id}` — Change an appointment's status.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] for a missing or foreign appointment
/// and [`BookingError::InvalidArgument`] for an unknown status.
#[utoipa::path(
    patch,
    path = "/api/v1/clowns/appointments/{id}",
    tag = "Clowns",
    summary = "Update appointment status",
    description = "Partial update: only the status changes. Accepts `upcoming`, `incipient`, `completed` or `cancelled`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated appointment", body = ClownAppointmentView),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Caller is not a clown", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<uuid::Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let detail = state
        .appointment_service
        .update_status(&caller, AppointmentId::from_uuid(id), &req.status)
        .await?;
    Ok(Json(ClownAppointmentView::from(detail)))
}

/// `POST /clowns/appointments/{id}/issue` — Raise an issue.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] if the appointment does not exist and
/// [`BookingError::InvalidArgument`] for blank or overlong text.
#[utoipa::path(
    post,
    path = "/api/v1/clowns/appointments/{id}/issue",
    tag = "Clowns",
    summary = "Raise an issue",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    request_body = RaiseIssueRequest,
    responses(
        (status = 201, description = "Issue recorded", body = IssueResponse),
        (status = 400, description = "Invalid title or description", body = ErrorResponse),
        (status = 403, description = "Caller is not a clown", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn raise_issue(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<uuid::Uuid>,
    ValidatedJson(req): ValidatedJson<RaiseIssueRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let issue = state
        .appointment_service
        .raise_issue(
            &caller,
            AppointmentId::from_uuid(id),
            req.title,
            req.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(IssueResponse::from(issue))))
}

/// `POST /clowns/appointments/{id}/clientdetails` — Request the client's
/// contact details.
///
/// # Errors
///
/// Returns [`BookingError::NotFound`] if the appointment does not exist and
/// [`BookingError::InvalidArgument`] for a blank or overlong reason.
#[utoipa::path(
    post,
    path = "/api/v1/clowns/appointments/{id}/clientdetails",
    tag = "Clowns",
    summary = "Request client details",
    description = "Logs the reason, then returns the client's name, email and number.",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment UUID"),
    ),
    request_body = ClientDetailsRequestBody,
    responses(
        (status = 201, description = "Client contact details", body = ClientContact),
        (status = 400, description = "Invalid reason", body = ErrorResponse),
        (status = 403, description = "Caller is not a clown", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn request_client_details(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<uuid::Uuid>,
    ValidatedJson(req): ValidatedJson<ClientDetailsRequestBody>,
) -> Result<impl IntoResponse, BookingError> {
    let contact = state
        .appointment_service
        .request_client_details(&caller, AppointmentId::from_uuid(id), req.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Clown routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clowns/appointments", get(list_appointments))
        .route(
            "/clowns/appointments/{id}",
            get(get_appointment).patch(update_status),
        )
        .route("/clowns/appointments/{id}/issue", post(raise_issue))
        .route(
            "/clowns/appointments/{id}/clientdetails",
            post(request_client_details),
        )
}
