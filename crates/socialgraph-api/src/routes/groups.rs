use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use socialgraph_core::{Group, GroupId};

use crate::auth::RequireToken;
use crate::dto::{CreateGroupRequest, GroupRelationships, MessageResponse, UpdateGroupRequest};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/", get(list_groups).post(create_group))
        .route(
            "/groups/{id}",
            get(get_group).patch(update_group).delete(delete_group),
        )
        .route("/groups/{id}/relationships", get(group_relationships))
        .route("/groups/{id}/relationships/", get(group_relationships))
}

async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(state.repository.list_groups().await?))
}

async fn get_group(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Group>, ApiError> {
    let group = state.repository.require_group(GroupId(id)).await?;
    Ok(Json(group))
}

async fn group_relationships(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<GroupRelationships>, ApiError> {
    let (group, relations) = state.relationships.group_relationships(GroupId(id)).await?;
    Ok(Json(GroupRelationships::new(group, relations)))
}

async fn create_group(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiJson(req): ApiJson<CreateGroupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let group = state.repository.create_group(req.group_id, req.name).await?;
    state
        .relationships
        .attach_group_subscribers(group.id, &req.subscribers)
        .await?;
    Ok(Json(MessageResponse::new(format!("Group {} created", group.id))))
}

async fn update_group(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateGroupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = GroupId(id);
    state
        .relationships
        .apply_group_subscribers(id, &req.subscribers)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Group {id} updated with new subscribers"
    ))))
}

async fn delete_group(
    State(state): State<AppState>,
    _auth: RequireToken,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = GroupId(id);
    state.repository.delete_group(id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Group {id} and all its relationships deleted"
    ))))
}
