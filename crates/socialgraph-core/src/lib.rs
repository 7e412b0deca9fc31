//! socialgraph-core: Shared types, configuration, and error handling for the
//! social graph service.
//!
//! This crate provides the foundational types used across all components:
//! - Node types (User, Group) and typed identifiers
//! - Edge kinds (Subscribe, Follow) and single-hop traversals
//! - Configuration management
//! - The service error taxonomy

pub mod config;
pub mod error;
pub mod types;

pub use config::ServiceConfig;
pub use error::{Result, SocialError};
pub use types::{
    Direction, Edge, EdgeKind, Group, GroupId, NodeKind, NodeRef, Peer, Relation, Traversal, User,
    UserAttrs, UserId,
};
