//! Read operations for the social graph.

use neo4rs::{query, Row};

use socialgraph_core::{Direction, Group, GroupId, NodeRef, Peer, Traversal, User, UserAttrs, UserId};

use crate::client::{GraphClient, GraphError};

const USER_COLUMNS: &str = "n.user_id AS user_id, n.name AS name, n.sex AS sex,
       n.home_town AS home_town, n.city AS city,
       size([(n)<-[:FOLLOW]-(:User) | 1]) AS followers_count";

const GROUP_COLUMNS: &str = "n.group_id AS group_id, n.name AS name,
       size([(n)<-[:SUBSCRIBE]-(:User) | 1]) AS subscribers_count";

impl GraphClient {
    // ── Single Node Lookups ──────────────────────────────────────

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, GraphError> {
        let cypher = format!("MATCH (n:User {{user_id: $user_id}}) RETURN {USER_COLUMNS}");
        let q = query(&cypher).param("user_id", id.0);

        match self.query_one(q).await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_group(&self, id: GroupId) -> Result<Option<Group>, GraphError> {
        let cypher = format!("MATCH (n:Group {{group_id: $group_id}}) RETURN {GROUP_COLUMNS}");
        let q = query(&cypher).param("group_id", id.0);

        match self.query_one(q).await? {
            Some(row) => Ok(Some(group_from_row(&row)?)),
            None => Ok(None),
        }
    }

    // ── List Queries ─────────────────────────────────────────────

    /// All users, ordered by id.
    pub async fn all_users(&self) -> Result<Vec<User>, GraphError> {
        let cypher = format!("MATCH (n:User) RETURN {USER_COLUMNS} ORDER BY user_id");
        let rows = self.query_rows(query(&cypher)).await?;
        rows.iter().map(user_from_row).collect()
    }

    /// All groups, ordered by id.
    pub async fn all_groups(&self) -> Result<Vec<Group>, GraphError> {
        let cypher = format!("MATCH (n:Group) RETURN {GROUP_COLUMNS} ORDER BY group_id");
        let rows = self.query_rows(query(&cypher)).await?;
        rows.iter().map(group_from_row).collect()
    }

    // ── Traversals ───────────────────────────────────────────────

    /// Peers reachable from `anchor` by one edge matching `traversal`.
    pub async fn traverse(
        &self,
        traversal: Traversal,
        anchor: NodeRef,
    ) -> Result<Vec<Peer>, GraphError> {
        let peer_kind = traversal.peer_kind();
        let cypher = format!(
            "MATCH (a:{anchor_label} {{{anchor_key}: $anchor}}){pattern}(b:{peer_label})
             RETURN b.{peer_key} AS peer_id, b.name AS name
             ORDER BY peer_id",
            anchor_label = anchor.kind().label(),
            anchor_key = anchor.kind().id_key(),
            pattern = rel_pattern(traversal),
            peer_label = peer_kind.label(),
            peer_key = peer_kind.id_key(),
        );

        let q = query(&cypher).param("anchor", anchor.raw_id());
        let rows = self.query_rows(q).await?;

        let mut peers = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row
                .get("peer_id")
                .map_err(|e| GraphError::Serialization(format!("Failed to get peer id: {e}")))?;
            peers.push(Peer {
                node: NodeRef::from_raw(peer_kind, id),
                name: row.get::<String>("name").unwrap_or_default(),
            });
        }
        Ok(peers)
    }

    pub async fn ping(&self) -> Result<(), GraphError> {
        self.query_one(query("RETURN 1 AS ok")).await?;
        Ok(())
    }
}

/// Relationship pattern between `(a)` and `(b)` for a traversal.
fn rel_pattern(traversal: Traversal) -> String {
    let rel_type = traversal.edge.rel_type();
    match traversal.direction {
        Direction::Outgoing => format!("-[:{rel_type}]->"),
        Direction::Incoming => format!("<-[:{rel_type}]-"),
    }
}

fn user_from_row(row: &Row) -> Result<User, GraphError> {
    let id: i64 = row
        .get("user_id")
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize user: {e}")))?;

    Ok(User {
        id: UserId(id),
        name: row.get::<String>("name").unwrap_or_default(),
        attrs: UserAttrs {
            sex: row.get::<i64>("sex").ok(),
            home_town: row.get::<String>("home_town").ok(),
            city: row.get::<String>("city").ok(),
        },
        followers_count: count_column(row, "followers_count"),
    })
}

fn group_from_row(row: &Row) -> Result<Group, GraphError> {
    let id: i64 = row
        .get("group_id")
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize group: {e}")))?;

    Ok(Group {
        id: GroupId(id),
        name: row.get::<String>("name").unwrap_or_default(),
        subscribers_count: count_column(row, "subscribers_count"),
    })
}

fn count_column(row: &Row, key: &str) -> u64 {
    row.get::<i64>(key).unwrap_or(0).max(0) as u64
}
