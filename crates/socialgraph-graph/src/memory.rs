//! In-process property graph implementing [`GraphStore`].
//!
//! Used by the test suites and by the API's `--memory` mode. A single
//! `RwLock` serialises every operation, standing in for the per-statement
//! atomicity a real backend provides.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use socialgraph_core::{
    Direction, Edge, EdgeKind, Group, GroupId, NodeRef, Peer, Traversal, User, UserId,
};

use crate::client::GraphError;
use crate::store::GraphStore;

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    /// (user, group)
    subscriptions: BTreeSet<(UserId, GroupId)>,
    /// (follower, followed)
    follows: BTreeSet<(UserId, UserId)>,
}

impl State {
    fn contains(&self, node: NodeRef) -> bool {
        match node {
            NodeRef::User(id) => self.users.contains_key(&id),
            NodeRef::Group(id) => self.groups.contains_key(&id),
        }
    }

    fn name_of(&self, node: NodeRef) -> Option<String> {
        match node {
            NodeRef::User(id) => self.users.get(&id).map(|u| u.name.clone()),
            NodeRef::Group(id) => self.groups.get(&id).map(|g| g.name.clone()),
        }
    }

    fn user_view(&self, user: &User) -> User {
        let followers = self.follows.iter().filter(|(_, f)| *f == user.id).count();
        User {
            followers_count: followers as u64,
            ..user.clone()
        }
    }

    fn group_view(&self, group: &Group) -> Group {
        let subscribers = self
            .subscriptions
            .iter()
            .filter(|(_, g)| *g == group.id)
            .count();
        Group {
            subscribers_count: subscribers as u64,
            ..group.clone()
        }
    }

    /// Raw (anchor, peer) pairs for every stored edge of `kind`, oriented
    /// according to `direction`.
    fn oriented_pairs(&self, kind: EdgeKind, direction: Direction) -> Vec<(NodeRef, NodeRef)> {
        let edges: Vec<(NodeRef, NodeRef)> = match kind {
            EdgeKind::Subscribe => self
                .subscriptions
                .iter()
                .map(|(u, g)| (NodeRef::User(*u), NodeRef::Group(*g)))
                .collect(),
            EdgeKind::Follow => self
                .follows
                .iter()
                .map(|(a, b)| (NodeRef::User(*a), NodeRef::User(*b)))
                .collect(),
        };
        match direction {
            Direction::Outgoing => edges,
            Direction::Incoming => edges.into_iter().map(|(s, t)| (t, s)).collect(),
        }
    }
}

/// In-memory graph backend.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    state: RwLock<State>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored edges of the given kind.
    pub async fn edge_count(&self, kind: EdgeKind) -> usize {
        let state = self.state.read().await;
        match kind {
            EdgeKind::Subscribe => state.subscriptions.len(),
            EdgeKind::Follow => state.follows.len(),
        }
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn insert_user(&self, user: &User) -> Result<bool, GraphError> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.id) {
            return Ok(false);
        }
        state.users.insert(
            user.id,
            User {
                followers_count: 0,
                ..user.clone()
            },
        );
        Ok(true)
    }

    async fn insert_group(&self, group: &Group) -> Result<bool, GraphError> {
        let mut state = self.state.write().await;
        if state.groups.contains_key(&group.id) {
            return Ok(false);
        }
        state.groups.insert(
            group.id,
            Group {
                subscribers_count: 0,
                ..group.clone()
            },
        );
        Ok(true)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, GraphError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(|u| state.user_view(u)))
    }

    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, GraphError> {
        let state = self.state.read().await;
        Ok(state.groups.get(&id).map(|g| state.group_view(g)))
    }

    async fn all_users(&self) -> Result<Vec<User>, GraphError> {
        let state = self.state.read().await;
        Ok(state.users.values().map(|u| state.user_view(u)).collect())
    }

    async fn all_groups(&self) -> Result<Vec<Group>, GraphError> {
        let state = self.state.read().await;
        Ok(state.groups.values().map(|g| state.group_view(g)).collect())
    }

    async fn detach_delete_user(&self, id: UserId) -> Result<bool, GraphError> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.subscriptions.retain(|(u, _)| *u != id);
        state.follows.retain(|(a, b)| *a != id && *b != id);
        Ok(true)
    }

    async fn detach_delete_group(&self, id: GroupId) -> Result<bool, GraphError> {
        let mut state = self.state.write().await;
        if state.groups.remove(&id).is_none() {
            return Ok(false);
        }
        state.subscriptions.retain(|(_, g)| *g != id);
        Ok(true)
    }

    async fn merge_edge(&self, edge: Edge) -> Result<bool, GraphError> {
        let mut state = self.state.write().await;
        if !state.contains(edge.source()) || !state.contains(edge.target()) {
            return Ok(false);
        }
        match edge {
            Edge::Subscribe { user, group } => {
                state.subscriptions.insert((user, group));
            }
            Edge::Follow { follower, followed } => {
                state.follows.insert((follower, followed));
            }
        }
        Ok(true)
    }

    async fn traverse(
        &self,
        traversal: Traversal,
        anchor: NodeRef,
    ) -> Result<Vec<Peer>, GraphError> {
        let state = self.state.read().await;
        if anchor.kind() != traversal.anchor_kind() {
            return Ok(Vec::new());
        }

        let peers = state
            .oriented_pairs(traversal.edge, traversal.direction)
            .into_iter()
            .filter(|(a, _)| *a == anchor)
            .filter_map(|(_, peer)| state.name_of(peer).map(|name| Peer { node: peer, name }))
            .collect();
        Ok(peers)
    }

    async fn ping(&self) -> Result<(), GraphError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialgraph_core::UserAttrs;

    fn user(id: i64, name: &str) -> User {
        User::new(UserId(id), name, UserAttrs::default())
    }

    #[tokio::test]
    async fn test_insert_refuses_existing_id() {
        let graph = MemoryGraph::new();
        assert!(graph.insert_user(&user(1, "A")).await.unwrap());
        assert!(!graph.insert_user(&user(1, "Other")).await.unwrap());

        let stored = graph.get_user(UserId(1)).await.unwrap().unwrap();
        assert_eq!(stored.name, "A");
    }

    #[tokio::test]
    async fn test_merge_edge_requires_both_endpoints() {
        let graph = MemoryGraph::new();
        graph.insert_user(&user(1, "A")).await.unwrap();

        let edge = Edge::Subscribe {
            user: UserId(1),
            group: GroupId(10),
        };
        assert!(!graph.merge_edge(edge).await.unwrap());
        assert_eq!(graph.edge_count(EdgeKind::Subscribe).await, 0);

        graph.insert_group(&Group::new(GroupId(10), "G")).await.unwrap();
        assert!(graph.merge_edge(edge).await.unwrap());
        assert!(graph.merge_edge(edge).await.unwrap());
        assert_eq!(graph.edge_count(EdgeKind::Subscribe).await, 1);
    }

    #[tokio::test]
    async fn test_follow_is_directed() {
        let graph = MemoryGraph::new();
        graph.insert_user(&user(1, "A")).await.unwrap();
        graph.insert_user(&user(2, "B")).await.unwrap();
        graph
            .merge_edge(Edge::Follow {
                follower: UserId(2),
                followed: UserId(1),
            })
            .await
            .unwrap();

        let following = graph
            .traverse(Traversal::FOLLOWING, NodeRef::User(UserId(1)))
            .await
            .unwrap();
        assert!(following.is_empty());

        let followers = graph
            .traverse(Traversal::FOLLOWERS, NodeRef::User(UserId(1)))
            .await
            .unwrap();
        assert_eq!(
            followers,
            vec![Peer {
                node: NodeRef::User(UserId(2)),
                name: "B".to_string()
            }]
        );

        let a = graph.get_user(UserId(1)).await.unwrap().unwrap();
        assert_eq!(a.followers_count, 1);
    }

    #[tokio::test]
    async fn test_detach_delete_removes_incident_edges() {
        let graph = MemoryGraph::new();
        graph.insert_user(&user(1, "A")).await.unwrap();
        graph.insert_user(&user(2, "B")).await.unwrap();
        graph.insert_group(&Group::new(GroupId(10), "G")).await.unwrap();
        graph
            .merge_edge(Edge::Subscribe {
                user: UserId(1),
                group: GroupId(10),
            })
            .await
            .unwrap();
        graph
            .merge_edge(Edge::Follow {
                follower: UserId(2),
                followed: UserId(1),
            })
            .await
            .unwrap();

        assert!(graph.detach_delete_user(UserId(1)).await.unwrap());
        assert!(!graph.detach_delete_user(UserId(1)).await.unwrap());
        assert_eq!(graph.edge_count(EdgeKind::Subscribe).await, 0);
        assert_eq!(graph.edge_count(EdgeKind::Follow).await, 0);

        let group = graph.get_group(GroupId(10)).await.unwrap().unwrap();
        assert_eq!(group.subscribers_count, 0);
    }

    #[tokio::test]
    async fn test_traverse_with_wrong_anchor_kind_is_empty() {
        let graph = MemoryGraph::new();
        graph.insert_group(&Group::new(GroupId(1), "G")).await.unwrap();
        let peers = graph
            .traverse(Traversal::SUBSCRIPTIONS, NodeRef::Group(GroupId(1)))
            .await
            .unwrap();
        assert!(peers.is_empty());
    }
}
