use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use socialgraph_core::{User, UserId};

use crate::auth::RequireToken;
use crate::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserRelationships};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/relationships", get(user_relationships))
        .route("/users/{id}/relationships/", get(user_relationships))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.repository.list_users().await?))
}

async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state.repository.require_user(UserId(id)).await?;
    Ok(Json(user))
}

async fn user_relationships(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserRelationships>, ApiError> {
    let (user, relations) = state.relationships.user_relationships(UserId(id)).await?;
    Ok(Json(UserRelationships::new(user, relations)))
}

/// Create the user, then apply its relationships. A failing relationship
/// leaves the user and any edges applied before it in place.
async fn create_user(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = state
        .repository
        .create_user(req.user_id, req.name, req.attrs)
        .await?;
    state
        .relationships
        .attach_user_relationships(user.id, &req.subscriptions, &req.follows)
        .await?;
    Ok(Json(MessageResponse::new(format!("User {} created", user.id))))
}

async fn update_user(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = UserId(id);
    state
        .relationships
        .apply_user_relationships(id, &req.subscriptions, &req.follows)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "User {id} updated with new relationships"
    ))))
}

async fn delete_user(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = UserId(id);
    state.repository.delete_user(id).await?;
    Ok(Json(MessageResponse::new(format!(
        "User {id} and all its relationships deleted"
    ))))
}
