//! Core domain types for the social graph.
//!
//! The graph holds exactly two node kinds (User, Group) and two directed
//! edge kinds (Subscribe: User -> Group, Follow: User -> User).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ───────────────────────────────────────────────────

/// Identifier of a User node. Unique among users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Identifier of a Group node. Unique among groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ── Nodes ─────────────────────────────────────────────────────────

/// The two node kinds of the graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    User,
    Group,
}

impl NodeKind {
    /// Backend label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
        }
    }

    /// Name of the identifier property on nodes of this kind.
    pub fn id_key(&self) -> &'static str {
        match self {
            Self::User => "user_id",
            Self::Group => "group_id",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed reference to a node by identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeRef {
    User(UserId),
    Group(GroupId),
}

impl NodeRef {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::User(_) => NodeKind::User,
            Self::Group(_) => NodeKind::Group,
        }
    }

    /// Raw identifier value, as stored on the node.
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::User(id) => id.0,
            Self::Group(id) => id.0,
        }
    }

    /// Build a reference of the given kind from a raw identifier.
    pub fn from_raw(kind: NodeKind, id: i64) -> Self {
        match kind {
            NodeKind::User => Self::User(UserId(id)),
            NodeKind::Group => Self::Group(GroupId(id)),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

/// Optional demographic attributes of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// A user account in the social graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub attrs: UserAttrs,
    /// Number of incoming Follow edges, computed at read time.
    #[serde(default)]
    pub followers_count: u64,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, attrs: UserAttrs) -> Self {
        Self {
            id,
            name: name.into(),
            attrs,
            followers_count: 0,
        }
    }
}

/// A group users can subscribe to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Number of incoming Subscribe edges, computed at read time.
    #[serde(default)]
    pub subscribers_count: u64,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subscribers_count: 0,
        }
    }
}

// ── Edges ─────────────────────────────────────────────────────────

/// The two relationship kinds of the graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// User -> Group.
    Subscribe,
    /// User -> User.
    Follow,
}

impl EdgeKind {
    /// Backend relationship type.
    pub fn rel_type(&self) -> &'static str {
        match self {
            Self::Subscribe => "SUBSCRIBE",
            Self::Follow => "FOLLOW",
        }
    }

    /// Kind of the node the edge starts at.
    pub fn source_kind(&self) -> NodeKind {
        NodeKind::User
    }

    /// Kind of the node the edge points to.
    pub fn target_kind(&self) -> NodeKind {
        match self {
            Self::Subscribe => NodeKind::Group,
            Self::Follow => NodeKind::User,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribe => f.write_str("Subscribe"),
            Self::Follow => f.write_str("Follow"),
        }
    }
}

/// A concrete edge between two typed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Subscribe { user: UserId, group: GroupId },
    Follow { follower: UserId, followed: UserId },
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Self::Subscribe { .. } => EdgeKind::Subscribe,
            Self::Follow { .. } => EdgeKind::Follow,
        }
    }

    pub fn source(&self) -> NodeRef {
        match self {
            Self::Subscribe { user, .. } => NodeRef::User(*user),
            Self::Follow { follower, .. } => NodeRef::User(*follower),
        }
    }

    pub fn target(&self) -> NodeRef {
        match self {
            Self::Subscribe { group, .. } => NodeRef::Group(*group),
            Self::Follow { followed, .. } => NodeRef::User(*followed),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[{}]->({})", self.source(), self.kind(), self.target())
    }
}

/// Direction of an edge as seen from the anchor node of a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

// ── Traversals ────────────────────────────────────────────────────

/// A single-hop directed pattern anchored at a node.
///
/// Subscribe edges only have one meaningful direction per anchor kind,
/// Follow edges have two, so the valid traversals are enumerated as
/// constants rather than built freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Traversal {
    pub edge: EdgeKind,
    pub direction: Direction,
}

impl Traversal {
    /// Groups a user subscribes to.
    pub const SUBSCRIPTIONS: Self = Self {
        edge: EdgeKind::Subscribe,
        direction: Direction::Outgoing,
    };

    /// Users subscribed to a group.
    pub const SUBSCRIBERS: Self = Self {
        edge: EdgeKind::Subscribe,
        direction: Direction::Incoming,
    };

    /// Users a user follows.
    pub const FOLLOWING: Self = Self {
        edge: EdgeKind::Follow,
        direction: Direction::Outgoing,
    };

    /// Users following a user.
    pub const FOLLOWERS: Self = Self {
        edge: EdgeKind::Follow,
        direction: Direction::Incoming,
    };

    /// Kind of node the traversal starts from.
    pub fn anchor_kind(&self) -> NodeKind {
        match self.direction {
            Direction::Outgoing => self.edge.source_kind(),
            Direction::Incoming => self.edge.target_kind(),
        }
    }

    /// Kind of node the traversal arrives at.
    pub fn peer_kind(&self) -> NodeKind {
        match self.direction {
            Direction::Outgoing => self.edge.target_kind(),
            Direction::Incoming => self.edge.source_kind(),
        }
    }
}

/// A node reached by a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub node: NodeRef,
    pub name: String,
}

/// One relationship of an anchor node: edge kind, direction, and the node
/// on the other end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: EdgeKind,
    pub direction: Direction,
    pub peer: Peer,
}

impl Relation {
    /// Tag a peer with the traversal that reached it.
    pub fn via(traversal: Traversal, peer: Peer) -> Self {
        Self {
            kind: traversal.edge,
            direction: traversal.direction,
            peer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_endpoint_kinds() {
        assert_eq!(Traversal::SUBSCRIPTIONS.anchor_kind(), NodeKind::User);
        assert_eq!(Traversal::SUBSCRIPTIONS.peer_kind(), NodeKind::Group);
        assert_eq!(Traversal::SUBSCRIBERS.anchor_kind(), NodeKind::Group);
        assert_eq!(Traversal::SUBSCRIBERS.peer_kind(), NodeKind::User);
        assert_eq!(Traversal::FOLLOWING.anchor_kind(), NodeKind::User);
        assert_eq!(Traversal::FOLLOWERS.peer_kind(), NodeKind::User);
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = Edge::Subscribe {
            user: UserId(1),
            group: GroupId(10),
        };
        assert_eq!(edge.source(), NodeRef::User(UserId(1)));
        assert_eq!(edge.target(), NodeRef::Group(GroupId(10)));
        assert_eq!(edge.to_string(), "(User 1)-[Subscribe]->(Group 10)");
    }

    #[test]
    fn test_user_serializes_flat_attrs() {
        let user = User::new(
            UserId(7),
            "Ann",
            UserAttrs {
                sex: Some(2),
                home_town: None,
                city: Some("Riga".to_string()),
            },
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["sex"], 2);
        assert_eq!(json["city"], "Riga");
        assert!(json.get("home_town").is_none());
        assert_eq!(json["followers_count"], 0);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Incoming).unwrap(),
            "\"incoming\""
        );
        assert_eq!(
            serde_json::to_string(&EdgeKind::Subscribe).unwrap(),
            "\"Subscribe\""
        );
    }
}
