//! REST endpoint handlers organized by caller role.

pub mod client;
pub mod clown;
pub mod system;
pub mod troupe_leader;

use axum::Router;

use crate::app_state::AppState;

/// Composes all role routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(client::routes())
        .merge(troupe_leader::routes())
        .merge(clown::routes())
}
