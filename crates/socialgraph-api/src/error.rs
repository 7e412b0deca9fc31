//! HTTP mapping of the service error taxonomy.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use socialgraph_core::SocialError;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub SocialError);

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(SocialError::InvalidRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(SocialError::InvalidRequest(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SocialError::Conflict { .. } | SocialError::InvalidRelationship(_) => {
                StatusCode::BAD_REQUEST
            }
            SocialError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SocialError::NotFound { .. } => StatusCode::NOT_FOUND,
            SocialError::Forbidden(_) => StatusCode::FORBIDDEN,
            SocialError::Config(_) | SocialError::Graph(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self.0 {
            SocialError::Forbidden(_) => "Invalid token".to_string(),
            SocialError::Config(_) | SocialError::Graph(_) => {
                tracing::error!(error = %self.0, "Request failed");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialgraph_core::{GroupId, UserId};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(SocialError::group_not_found(GroupId(1))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(SocialError::conflict(socialgraph_core::NodeRef::User(UserId(1)))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(SocialError::Forbidden("bad".into())).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(SocialError::InvalidRequest("bad body".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError(SocialError::Graph("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
