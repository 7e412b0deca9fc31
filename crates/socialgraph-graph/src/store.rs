//! The graph store seam.
//!
//! Every read and write of the social graph goes through [`GraphStore`].
//! Each method is a single backend round-trip and atomic on its own; no call
//! spans more than one mutation.

use async_trait::async_trait;

use socialgraph_core::{Edge, Group, GroupId, NodeRef, Peer, Traversal, User, UserId};

use crate::client::{GraphClient, GraphError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create the user unless one with the same id exists.
    /// Returns `false` (and leaves the existing node untouched) on a clash.
    async fn insert_user(&self, user: &User) -> Result<bool, GraphError>;

    /// Create the group unless one with the same id exists.
    async fn insert_group(&self, group: &Group) -> Result<bool, GraphError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, GraphError>;
    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, GraphError>;

    async fn all_users(&self) -> Result<Vec<User>, GraphError>;
    async fn all_groups(&self) -> Result<Vec<Group>, GraphError>;

    /// Delete the user and every incident edge. Returns `false` if absent.
    async fn detach_delete_user(&self, id: UserId) -> Result<bool, GraphError>;

    /// Delete the group and every incident edge. Returns `false` if absent.
    async fn detach_delete_group(&self, id: GroupId) -> Result<bool, GraphError>;

    /// Merge the edge between two existing endpoints.
    /// Returns `false` when either endpoint is missing (nothing is created).
    async fn merge_edge(&self, edge: Edge) -> Result<bool, GraphError>;

    /// Follow one single-hop pattern from `anchor`. An anchor of the wrong
    /// kind for the traversal matches nothing.
    async fn traverse(&self, traversal: Traversal, anchor: NodeRef)
        -> Result<Vec<Peer>, GraphError>;

    /// Round-trip to the backend.
    async fn ping(&self) -> Result<(), GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn insert_user(&self, user: &User) -> Result<bool, GraphError> {
        GraphClient::insert_user(self, user).await
    }

    async fn insert_group(&self, group: &Group) -> Result<bool, GraphError> {
        GraphClient::insert_group(self, group).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, GraphError> {
        GraphClient::get_user(self, id).await
    }

    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, GraphError> {
        GraphClient::get_group(self, id).await
    }

    async fn all_users(&self) -> Result<Vec<User>, GraphError> {
        GraphClient::all_users(self).await
    }

    async fn all_groups(&self) -> Result<Vec<Group>, GraphError> {
        GraphClient::all_groups(self).await
    }

    async fn detach_delete_user(&self, id: UserId) -> Result<bool, GraphError> {
        self.detach_delete(NodeRef::User(id)).await
    }

    async fn detach_delete_group(&self, id: GroupId) -> Result<bool, GraphError> {
        self.detach_delete(NodeRef::Group(id)).await
    }

    async fn merge_edge(&self, edge: Edge) -> Result<bool, GraphError> {
        GraphClient::merge_edge(self, edge).await
    }

    async fn traverse(
        &self,
        traversal: Traversal,
        anchor: NodeRef,
    ) -> Result<Vec<Peer>, GraphError> {
        GraphClient::traverse(self, traversal, anchor).await
    }

    async fn ping(&self) -> Result<(), GraphError> {
        GraphClient::ping(self).await
    }
}
