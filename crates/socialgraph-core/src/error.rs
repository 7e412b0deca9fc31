use thiserror::Error;

use crate::types::{GroupId, NodeKind, NodeRef, UserId};

/// Top-level error type for the social graph service.
#[derive(Error, Debug)]
pub enum SocialError {
    #[error("{kind} {id} already exists")]
    Conflict { kind: NodeKind, id: i64 },

    #[error("{kind} {id} not found")]
    NotFound { kind: NodeKind, id: i64 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Malformed request body or path parameter.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),
}

impl SocialError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::NotFound {
            kind: NodeKind::User,
            id: id.0,
        }
    }

    pub fn group_not_found(id: GroupId) -> Self {
        Self::NotFound {
            kind: NodeKind::Group,
            id: id.0,
        }
    }

    /// `NotFound` for whichever node the reference points at.
    pub fn missing(node: NodeRef) -> Self {
        Self::NotFound {
            kind: node.kind(),
            id: node.raw_id(),
        }
    }

    pub fn conflict(node: NodeRef) -> Self {
        Self::Conflict {
            kind: node.kind(),
            id: node.raw_id(),
        }
    }
}

impl From<config::ConfigError> for SocialError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_identifier() {
        assert_eq!(
            SocialError::group_not_found(GroupId(10)).to_string(),
            "Group 10 not found"
        );
        assert_eq!(
            SocialError::conflict(NodeRef::User(UserId(1))).to_string(),
            "User 1 already exists"
        );
    }
}
