//! Postgres-backed user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use super::{StoreError, StoredCollection, UserStore};
use crate::models::auth::UserRecord;
use crate::models::recipes::SavedRecipe;

/// Row returned by user lookups.
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id.to_string(),
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// User store over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for health checks.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ids that are not UUIDs cannot name a row; treat them as unknown users
/// instead of letting the `uuid` cast fail inside Postgres.
fn parse_user_id(user_id: &str) -> Option<Uuid> {
    Uuid::parse_str(user_id).ok()
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                StoreError::DuplicateEmail
            } else {
                StoreError::Db(e)
            }
        })?;
        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserRecord::from))
    }

    async fn load_collection(
        &self,
        user_id: &str,
    ) -> Result<Option<StoredCollection>, StoreError> {
        let Some(id) = parse_user_id(user_id) else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, (Json<Vec<SavedRecipe>>, i64)>(
            "SELECT saved_recipes, revision FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(entries), revision)| StoredCollection { entries, revision }))
    }

    async fn replace_collection(
        &self,
        user_id: &str,
        expected_revision: i64,
        entries: &[SavedRecipe],
    ) -> Result<Option<i64>, StoreError> {
        let Some(id) = parse_user_id(user_id) else {
            return Ok(None);
        };
        let revision = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET saved_recipes = $3, revision = revision + 1
            WHERE id = $1 AND revision = $2
            RETURNING revision
            "#,
        )
        .bind(id)
        .bind(expected_revision)
        .bind(Json(entries))
        .fetch_optional(&self.pool)
        .await?;
        Ok(revision)
    }
}
