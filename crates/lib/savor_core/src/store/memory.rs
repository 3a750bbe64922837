//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StoreError, StoredCollection, UserStore};
use crate::models::auth::UserRecord;
use crate::models::recipes::SavedRecipe;
use crate::uuid::uuidv7;

#[derive(Debug, Clone)]
struct MemoryUser {
    record: UserRecord,
    collection: StoredCollection,
}

/// Process-local store keyed by user id. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, MemoryUser>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        debug!("creating in-memory user store");
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.record.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let record = UserRecord {
            id: uuidv7().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(
            record.id.clone(),
            MemoryUser {
                record: record.clone(),
                collection: StoredCollection::default(),
            },
        );
        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.record.email == email)
            .map(|u| u.record.clone()))
    }

    async fn load_collection(
        &self,
        user_id: &str,
    ) -> Result<Option<StoredCollection>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).map(|u| u.collection.clone()))
    }

    async fn replace_collection(
        &self,
        user_id: &str,
        expected_revision: i64,
        entries: &[SavedRecipe],
    ) -> Result<Option<i64>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_id) else {
            return Ok(None);
        };
        if user.collection.revision != expected_revision {
            return Ok(None);
        }
        user.collection = StoredCollection {
            entries: entries.to_vec(),
            revision: expected_revision + 1,
        };
        Ok(Some(user.collection.revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, order: i64) -> SavedRecipe {
        SavedRecipe {
            recipe_id: id.to_string(),
            title: format!("Recipe {id}"),
            image: String::new(),
            ready_in_minutes: None,
            servings: None,
            order,
            added_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn new_user_has_empty_collection_at_revision_zero() {
        let store = MemoryUserStore::new();
        let user = store.create_user("a@example.com", "hash").await.unwrap();
        let coll = store.load_collection(&user.id).await.unwrap().unwrap();
        assert!(coll.entries.is_empty());
        assert_eq!(coll.revision, 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create_user("a@example.com", "hash").await.unwrap();
        let err = store.create_user("a@example.com", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn find_by_email_returns_created_user() {
        let store = MemoryUserStore::new();
        let user = store.create_user("a@example.com", "hash").await.unwrap();
        let found = store.find_user_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_user_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_bumps_revision() {
        let store = MemoryUserStore::new();
        let user = store.create_user("a@example.com", "hash").await.unwrap();
        let rev = store
            .replace_collection(&user.id, 0, &[entry("1", 0)])
            .await
            .unwrap();
        assert_eq!(rev, Some(1));
        let coll = store.load_collection(&user.id).await.unwrap().unwrap();
        assert_eq!(coll.entries.len(), 1);
        assert_eq!(coll.revision, 1);
    }

    #[tokio::test]
    async fn replace_with_stale_revision_writes_nothing() {
        let store = MemoryUserStore::new();
        let user = store.create_user("a@example.com", "hash").await.unwrap();
        store
            .replace_collection(&user.id, 0, &[entry("1", 0)])
            .await
            .unwrap();
        let rev = store
            .replace_collection(&user.id, 0, &[entry("2", 0)])
            .await
            .unwrap();
        assert_eq!(rev, None);
        let coll = store.load_collection(&user.id).await.unwrap().unwrap();
        assert_eq!(coll.entries[0].recipe_id, "1");
    }

    #[tokio::test]
    async fn unknown_user_loads_none() {
        let store = MemoryUserStore::new();
        assert!(store.load_collection("missing").await.unwrap().is_none());
        assert_eq!(
            store.replace_collection("missing", 0, &[]).await.unwrap(),
            None
        );
    }
}
