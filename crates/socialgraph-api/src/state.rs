//! Shared router state.

use std::sync::Arc;

use socialgraph_graph::{EntityRepository, GraphStore, RelationshipManager};

/// Everything a handler needs. Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
    pub repository: EntityRepository,
    pub relationships: RelationshipManager,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn GraphStore>, api_token: &str) -> Self {
        Self {
            repository: EntityRepository::new(store.clone()),
            relationships: RelationshipManager::new(store.clone()),
            store,
            api_token: Arc::from(api_token),
        }
    }
}
