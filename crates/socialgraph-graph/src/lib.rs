//! socialgraph-graph: graph access for the social graph service.
//!
//! All graph reads and writes flow through the [`GraphStore`] seam, backed
//! either by Neo4j ([`GraphClient`]) or by the in-process [`MemoryGraph`].
//! On top of it sit the [`EntityRepository`] (nodes) and the
//! [`RelationshipManager`] (edges).

pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod relationships;
pub mod repository;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryGraph;
pub use relationships::RelationshipManager;
pub use repository::EntityRepository;
pub use store::GraphStore;
