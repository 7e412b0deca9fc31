//! Shared-secret authorization for write routes.
//!
//! The secret is taken from a `token` header, or from
//! `Authorization: Bearer <secret>`. Missing and mismatching credentials
//! are both rejected with 403.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use socialgraph_core::SocialError;

use crate::error::ApiError;
use crate::state::AppState;

pub const TOKEN_HEADER: &str = "token";

/// Extractor proving the request carried the configured secret.
///
/// Add it to a handler's arguments (before any body extractor) to make the
/// route a protected one.
#[derive(Debug, Clone, Copy)]
pub struct RequireToken;

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match presented_token(parts) {
            Some(token) if token == &*state.api_token => Ok(RequireToken),
            Some(_) => {
                tracing::warn!(path = %parts.uri.path(), "Rejected write: token mismatch");
                Err(SocialError::Forbidden("token mismatch".to_string()).into())
            }
            None => {
                tracing::warn!(path = %parts.uri.path(), "Rejected write: no token");
                Err(SocialError::Forbidden("missing token".to_string()).into())
            }
        }
    }
}

fn presented_token(parts: &Parts) -> Option<&str> {
    if let Some(value) = parts.headers.get(TOKEN_HEADER) {
        return value.to_str().ok();
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
