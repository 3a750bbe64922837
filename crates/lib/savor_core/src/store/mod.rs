// @zen-component: STORE-UserStore
//
//! User identity store.
//!
//! One record per user; the saved-recipe collection lives inside that
//! record next to a revision counter. Every write of the collection is a
//! compare-and-swap on the revision, so two concurrent writers can never
//! silently overwrite each other.
//!
//! Backends:
//! - [`postgres::PgUserStore`]: `users` table, collection as JSONB
//! - [`memory::MemoryUserStore`]: process-local, for tests and demos

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::UserRecord;
use crate::models::recipes::SavedRecipe;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw collection as persisted, in storage order, with its revision.
#[derive(Debug, Clone, Default)]
pub struct StoredCollection {
    pub entries: Vec<SavedRecipe>,
    pub revision: i64,
}

/// Persistence contract for users and their embedded collections.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Short backend name, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Insert a new user with an empty collection at revision 0.
    ///
    /// `email` must already be normalized.
    async fn create_user(&self, email: &str, password_hash: &str)
    -> Result<UserRecord, StoreError>;

    /// Look a user up by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Load a user's collection. `None` if the user does not exist.
    async fn load_collection(&self, user_id: &str)
    -> Result<Option<StoredCollection>, StoreError>;

    /// Replace a user's collection if its revision is still `expected_revision`.
    ///
    /// Returns the new revision, or `None` when the revision moved on (or the
    /// user disappeared) and nothing was written.
    async fn replace_collection(
        &self,
        user_id: &str,
        expected_revision: i64,
        entries: &[SavedRecipe],
    ) -> Result<Option<i64>, StoreError>;
}
