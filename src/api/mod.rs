//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All role endpoints are mounted under `/api/v1`; `/health` sits at the
//! root. With the `swagger-ui` feature the OpenAPI document is served at
//! `/api-docs/openapi.json` and browsable at `/swagger-ui`.

pub mod dto;
pub mod extract;
pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "troupe-booking",
        description = "Role-scoped appointment booking for clown troupes."
    ),
    paths(
        handlers::client::list_appointments,
        handlers::client::list_upcoming,
        handlers::client::list_past,
        handlers::client::get_appointment,
        handlers::client::rate_appointment,
        handlers::troupe_leader::create_appointment,
        handlers::clown::list_appointments,
        handlers::clown::get_appointment,
        handlers::clown::update_status,
        handlers::clown::raise_issue,
        handlers::clown::request_client_details,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Clients", description = "Appointments owned by the calling client"),
        (name = "Troupe Leaders", description = "Booking for the leader's troupe"),
        (name = "Clowns", description = "Appointments of the clown's troupe"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Wraps a stateful router in request tracing, a per-request timeout
/// answered with `408 Request Timeout`, and permissive CORS.
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
}
