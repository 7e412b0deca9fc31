//! Type-safe create/find/delete for User and Group nodes.

use std::sync::Arc;

use socialgraph_core::{Group, GroupId, NodeRef, Result, SocialError, User, UserAttrs, UserId};

use crate::store::GraphStore;

/// Entity repository over a [`GraphStore`]. Clone is cheap.
#[derive(Clone)]
pub struct EntityRepository {
    store: Arc<dyn GraphStore>,
}

impl EntityRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    // ── Users ────────────────────────────────────────────────────

    /// Create a user. Fails with `Conflict` if the id is taken; the
    /// existing node is left as it was.
    pub async fn create_user(
        &self,
        id: UserId,
        name: impl Into<String>,
        attrs: UserAttrs,
    ) -> Result<User> {
        let user = User::new(id, name, attrs);
        if !self.store.insert_user(&user).await? {
            return Err(SocialError::conflict(NodeRef::User(id)));
        }
        tracing::info!(user_id = %id, name = %user.name, "User created");
        Ok(user)
    }

    pub async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.store.get_user(id).await?)
    }

    /// Like [`find_user`](Self::find_user) but absence is an error.
    pub async fn require_user(&self, id: UserId) -> Result<User> {
        self.find_user(id)
            .await?
            .ok_or_else(|| SocialError::user_not_found(id))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.all_users().await?)
    }

    /// Delete a user along with every Subscribe and Follow edge touching it.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        if !self.store.detach_delete_user(id).await? {
            return Err(SocialError::user_not_found(id));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    // ── Groups ───────────────────────────────────────────────────

    pub async fn create_group(&self, id: GroupId, name: impl Into<String>) -> Result<Group> {
        let group = Group::new(id, name);
        if !self.store.insert_group(&group).await? {
            return Err(SocialError::conflict(NodeRef::Group(id)));
        }
        tracing::info!(group_id = %id, name = %group.name, "Group created");
        Ok(group)
    }

    pub async fn find_group(&self, id: GroupId) -> Result<Option<Group>> {
        Ok(self.store.get_group(id).await?)
    }

    pub async fn require_group(&self, id: GroupId) -> Result<Group> {
        self.find_group(id)
            .await?
            .ok_or_else(|| SocialError::group_not_found(id))
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        Ok(self.store.all_groups().await?)
    }

    /// Delete a group along with every Subscribe edge pointing at it.
    pub async fn delete_group(&self, id: GroupId) -> Result<()> {
        if !self.store.detach_delete_group(id).await? {
            return Err(SocialError::group_not_found(id));
        }
        tracing::info!(group_id = %id, "Group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;

    fn repo() -> EntityRepository {
        EntityRepository::new(Arc::new(MemoryGraph::new()))
    }

    #[tokio::test]
    async fn test_created_user_is_listed_once() {
        let repo = repo();
        repo.create_user(UserId(1), "Test User", UserAttrs::default())
            .await
            .unwrap();

        let users = repo.list_users().await.unwrap();
        let matching: Vec<_> = users
            .iter()
            .filter(|u| u.id == UserId(1) && u.name == "Test User")
            .collect();
        assert_eq!(matching.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_user_conflicts_and_keeps_original() {
        let repo = repo();
        let attrs = UserAttrs {
            sex: Some(1),
            home_town: Some("Test Town".to_string()),
            city: Some("Test City".to_string()),
        };
        repo.create_user(UserId(1), "Original", attrs.clone())
            .await
            .unwrap();

        let err = repo
            .create_user(UserId(1), "Impostor", UserAttrs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SocialError::Conflict { id: 1, .. }));

        let stored = repo.require_user(UserId(1)).await.unwrap();
        assert_eq!(stored.name, "Original");
        assert_eq!(stored.attrs, attrs);
    }

    #[tokio::test]
    async fn test_user_and_group_ids_are_independent() {
        let repo = repo();
        repo.create_user(UserId(1), "U", UserAttrs::default())
            .await
            .unwrap();
        let group = repo.create_group(GroupId(1), "G").await.unwrap();
        assert_eq!(group.subscribers_count, 0);
        assert!(repo.create_group(GroupId(1), "G2").await.is_err());
    }

    #[tokio::test]
    async fn test_find_returns_none_for_absent() {
        let repo = repo();
        assert!(repo.find_user(UserId(42)).await.unwrap().is_none());
        assert!(repo.find_group(GroupId(42)).await.unwrap().is_none());
        assert!(matches!(
            repo.require_group(GroupId(42)).await,
            Err(SocialError::NotFound { id: 42, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_absent_is_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.delete_user(UserId(5)).await,
            Err(SocialError::NotFound { id: 5, .. })
        ));

        repo.create_group(GroupId(5), "G").await.unwrap();
        repo.delete_group(GroupId(5)).await.unwrap();
        assert!(repo.list_groups().await.unwrap().is_empty());
    }
}
