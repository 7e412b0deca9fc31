//! HTTP routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::HealthResponse;
use crate::state::AppState;

mod groups;
mod users;

/// Create all HTTP routes. Collection and relationship paths answer with
/// and without a trailing slash.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(users::routes())
        .merge(groups::routes())
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(HealthResponse { status: "ok" })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
