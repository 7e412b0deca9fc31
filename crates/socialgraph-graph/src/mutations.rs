//! Write operations for the social graph.
//!
//! Node creation refuses to overwrite: a create against an existing id
//! matches nothing and reports `false`. Edges use MERGE so re-issuing the
//! same edge never duplicates it.

use neo4rs::query;

use socialgraph_core::{Edge, Group, NodeRef, User};

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    // ── Node Creation ────────────────────────────────────────────

    /// Create a User node if no user has its id.
    pub async fn insert_user(&self, user: &User) -> Result<bool, GraphError> {
        // Absent attributes are left unset rather than written as null.
        let mut sets = vec!["n.name = $name"];
        if user.attrs.sex.is_some() {
            sets.push("n.sex = $sex");
        }
        if user.attrs.home_town.is_some() {
            sets.push("n.home_town = $home_town");
        }
        if user.attrs.city.is_some() {
            sets.push("n.city = $city");
        }

        let cypher = format!(
            "OPTIONAL MATCH (existing:User {{user_id: $user_id}})
             WITH existing WHERE existing IS NULL
             CREATE (n:User {{user_id: $user_id}})
             SET {}
             RETURN count(n) AS cnt",
            sets.join(", ")
        );

        let mut q = query(&cypher)
            .param("user_id", user.id.0)
            .param("name", user.name.clone());
        if let Some(sex) = user.attrs.sex {
            q = q.param("sex", sex);
        }
        if let Some(home_town) = &user.attrs.home_town {
            q = q.param("home_town", home_town.clone());
        }
        if let Some(city) = &user.attrs.city {
            q = q.param("city", city.clone());
        }

        Ok(self.query_count(q).await? > 0)
    }

    /// Create a Group node if no group has its id.
    pub async fn insert_group(&self, group: &Group) -> Result<bool, GraphError> {
        let q = query(
            "OPTIONAL MATCH (existing:Group {group_id: $group_id})
             WITH existing WHERE existing IS NULL
             CREATE (n:Group {group_id: $group_id})
             SET n.name = $name
             RETURN count(n) AS cnt",
        )
        .param("group_id", group.id.0)
        .param("name", group.name.clone());

        Ok(self.query_count(q).await? > 0)
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Delete a node and all its relationships.
    pub async fn detach_delete(&self, node: NodeRef) -> Result<bool, GraphError> {
        let kind = node.kind();
        let cypher = format!(
            "MATCH (n:{label} {{{key}: $id}})
             DETACH DELETE n
             RETURN count(n) AS cnt",
            label = kind.label(),
            key = kind.id_key(),
        );

        let q = query(&cypher).param("id", node.raw_id());
        Ok(self.query_count(q).await? > 0)
    }

    // ── Edges ────────────────────────────────────────────────────

    /// Merge an edge between two existing nodes.
    pub async fn merge_edge(&self, edge: Edge) -> Result<bool, GraphError> {
        let source = edge.source();
        let target = edge.target();
        let cypher = format!(
            "MATCH (a:{source_label} {{{source_key}: $source_id}})
             MATCH (b:{target_label} {{{target_key}: $target_id}})
             MERGE (a)-[r:{rel_type}]->(b)
             RETURN count(r) AS cnt",
            source_label = source.kind().label(),
            source_key = source.kind().id_key(),
            target_label = target.kind().label(),
            target_key = target.kind().id_key(),
            rel_type = edge.kind().rel_type(),
        );

        let q = query(&cypher)
            .param("source_id", source.raw_id())
            .param("target_id", target.raw_id());

        Ok(self.query_count(q).await? > 0)
    }
}
