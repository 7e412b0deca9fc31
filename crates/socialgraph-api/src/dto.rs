//! Request and response bodies.

use serde::{Deserialize, Serialize};

use socialgraph_core::{
    Direction, EdgeKind, Group, GroupId, NodeRef, Relation, User, UserAttrs, UserId,
};

// ── Requests ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub attrs: UserAttrs,
    #[serde(default)]
    pub subscriptions: Vec<GroupId>,
    #[serde(default)]
    pub follows: Vec<UserId>,
}

/// Additional relationships for an existing user.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub subscriptions: Vec<GroupId>,
    #[serde(default)]
    pub follows: Vec<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub group_id: GroupId,
    pub name: String,
    #[serde(default)]
    pub subscribers: Vec<UserId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGroupRequest {
    #[serde(default)]
    pub subscribers: Vec<UserId>,
}

// ── Responses ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A relationship entry. Exactly one of `user_id` / `group_id` is set,
/// depending on the kind of node on the other end.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RelationView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    pub name: String,
    pub relationship: EdgeKind,
    pub direction: Direction,
}

impl From<Relation> for RelationView {
    fn from(relation: Relation) -> Self {
        let (user_id, group_id) = match relation.peer.node {
            NodeRef::User(id) => (Some(id), None),
            NodeRef::Group(id) => (None, Some(id)),
        };
        Self {
            user_id,
            group_id,
            name: relation.peer.name,
            relationship: relation.kind,
            direction: relation.direction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserRelationships {
    pub user_id: UserId,
    pub name: String,
    pub relationships: Vec<RelationView>,
}

impl UserRelationships {
    pub fn new(user: User, relations: Vec<Relation>) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            relationships: relations.into_iter().map(RelationView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupRelationships {
    pub group_id: GroupId,
    pub name: String,
    pub relationships: Vec<RelationView>,
}

impl GroupRelationships {
    pub fn new(group: Group, relations: Vec<Relation>) -> Self {
        Self {
            group_id: group.id,
            name: group.name,
            relationships: relations.into_iter().map(RelationView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
