//! Neo4j schema initialization.

use neo4rs::query;

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Ensure the uniqueness constraints on User and Group identifiers.
    ///
    /// Called once on startup. Constraints are created with `IF NOT EXISTS`
    /// so repeated calls are no-ops.
    pub async fn ensure_schema(&self) -> Result<(), GraphError> {
        self.run(query(
            "CREATE CONSTRAINT user_id_unique IF NOT EXISTS
             FOR (u:User) REQUIRE u.user_id IS UNIQUE",
        ))
        .await?;

        self.run(query(
            "CREATE CONSTRAINT group_id_unique IF NOT EXISTS
             FOR (g:Group) REQUIRE g.group_id IS UNIQUE",
        ))
        .await?;

        tracing::info!("Neo4j schema initialized (uniqueness constraints ensured)");
        Ok(())
    }
}
