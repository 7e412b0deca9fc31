//! socialgraph-api: HTTP surface of the social graph service.
//!
//! Reads are public. Creates, updates, and deletes require the shared
//! secret configured in `[auth] api_token`.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the application router with request tracing.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
