//! Authentication domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user account, without its saved-recipe collection.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user ID (standard JWT `sub` claim).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
