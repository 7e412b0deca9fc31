//! Subscribe and Follow edges: creation and lookup.

use std::sync::Arc;

use socialgraph_core::{
    Edge, Group, GroupId, NodeRef, Relation, Result, SocialError, Traversal, User, UserId,
};

use crate::store::GraphStore;

/// Patterns whose union makes up a user's relationships.
const USER_TRAVERSALS: [Traversal; 3] = [
    Traversal::SUBSCRIPTIONS,
    Traversal::FOLLOWING,
    Traversal::FOLLOWERS,
];

/// Patterns whose union makes up a group's relationships.
const GROUP_TRAVERSALS: [Traversal; 1] = [Traversal::SUBSCRIBERS];

/// Creates and queries edges between existing nodes. Clone is cheap.
#[derive(Clone)]
pub struct RelationshipManager {
    store: Arc<dyn GraphStore>,
}

impl RelationshipManager {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Subscribe a user to a group. Idempotent.
    pub async fn subscribe(&self, user: UserId, group: GroupId) -> Result<()> {
        self.connect(Edge::Subscribe { user, group }).await
    }

    /// Make `follower` follow `followed`. Idempotent. A user cannot follow
    /// itself.
    pub async fn follow(&self, follower: UserId, followed: UserId) -> Result<()> {
        if follower == followed {
            return Err(SocialError::InvalidRelationship(format!(
                "User {follower} cannot follow itself"
            )));
        }
        self.connect(Edge::Follow { follower, followed }).await
    }

    /// Apply subscriptions then follows for an existing user, in order.
    ///
    /// Stops at the first target that fails; edges merged before it stay.
    pub async fn apply_user_relationships(
        &self,
        user: UserId,
        subscriptions: &[GroupId],
        follows: &[UserId],
    ) -> Result<()> {
        if self.store.get_user(user).await?.is_none() {
            return Err(SocialError::user_not_found(user));
        }
        self.attach_user_relationships(user, subscriptions, follows).await
    }

    /// [`apply_user_relationships`](Self::apply_user_relationships) for a
    /// user just created, so without the lookup. A user deleted in between
    /// still surfaces as `NotFound` from the first merge.
    pub async fn attach_user_relationships(
        &self,
        user: UserId,
        subscriptions: &[GroupId],
        follows: &[UserId],
    ) -> Result<()> {
        for &group in subscriptions {
            self.subscribe(user, group).await?;
        }
        for &followed in follows {
            self.follow(user, followed).await?;
        }
        Ok(())
    }

    /// Subscribe each user to an existing group, in order.
    pub async fn apply_group_subscribers(
        &self,
        group: GroupId,
        subscribers: &[UserId],
    ) -> Result<()> {
        if self.store.get_group(group).await?.is_none() {
            return Err(SocialError::group_not_found(group));
        }
        self.attach_group_subscribers(group, subscribers).await
    }

    /// [`apply_group_subscribers`](Self::apply_group_subscribers) without the
    /// group lookup.
    pub async fn attach_group_subscribers(
        &self,
        group: GroupId,
        subscribers: &[UserId],
    ) -> Result<()> {
        for &user in subscribers {
            self.subscribe(user, group).await?;
        }
        Ok(())
    }

    async fn connect(&self, edge: Edge) -> Result<()> {
        if self.store.merge_edge(edge).await? {
            tracing::debug!(%edge, "Edge merged");
            return Ok(());
        }
        Err(self.missing_endpoint(edge).await?)
    }

    /// The `NotFound` error for a failed merge, naming the source first.
    async fn missing_endpoint(&self, edge: Edge) -> Result<SocialError> {
        let source = edge.source();
        if !self.exists(source).await? {
            return Ok(SocialError::missing(source));
        }
        Ok(SocialError::missing(edge.target()))
    }

    async fn exists(&self, node: NodeRef) -> Result<bool> {
        Ok(match node {
            NodeRef::User(id) => self.store.get_user(id).await?.is_some(),
            NodeRef::Group(id) => self.store.get_group(id).await?.is_some(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Groups the user subscribes to, users it follows, and users following
    /// it. Empty if the user has no edges; `NotFound` if it does not exist.
    pub async fn list_user_relationships(&self, user: UserId) -> Result<Vec<Relation>> {
        Ok(self.user_relationships(user).await?.1)
    }

    /// Subscribers of the group.
    pub async fn list_group_relationships(&self, group: GroupId) -> Result<Vec<Relation>> {
        Ok(self.group_relationships(group).await?.1)
    }

    /// The user together with its relationships.
    pub async fn user_relationships(&self, id: UserId) -> Result<(User, Vec<Relation>)> {
        let user = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| SocialError::user_not_found(id))?;
        let relations = self.collect(NodeRef::User(id), &USER_TRAVERSALS).await?;
        Ok((user, relations))
    }

    /// The group together with its relationships.
    pub async fn group_relationships(&self, id: GroupId) -> Result<(Group, Vec<Relation>)> {
        let group = self
            .store
            .get_group(id)
            .await?
            .ok_or_else(|| SocialError::group_not_found(id))?;
        let relations = self.collect(NodeRef::Group(id), &GROUP_TRAVERSALS).await?;
        Ok((group, relations))
    }

    /// Union of the peers reached by each traversal, tagged with it.
    async fn collect(&self, anchor: NodeRef, traversals: &[Traversal]) -> Result<Vec<Relation>> {
        let mut relations = Vec::new();
        for &traversal in traversals {
            let peers = self.store.traverse(traversal, anchor).await?;
            relations.extend(peers.into_iter().map(|peer| Relation::via(traversal, peer)));
        }
        Ok(relations)
    }
}
