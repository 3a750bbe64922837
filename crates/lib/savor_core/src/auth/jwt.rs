//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Access token lifetime: 24 hours.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Generate a signed JWT access token (HS256, 24 h expiry).
pub fn generate_access_token(
    user_id: &str,
    email: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %parent.display(), "could not create secret directory: {e}");
    }
    match std::fs::write(&secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            "generated JWT secret could not be persisted, tokens will not survive a restart: {e}"
        ),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("savor")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn token_roundtrip_preserves_subject() {
        let token = generate_access_token("user-1", "cook@example.com", SECRET).unwrap();
        let claims = verify_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "cook@example.com");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_access_token("user-1", "cook@example.com", b"other").unwrap();
        assert!(verify_access_token(&token, SECRET).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = TokenClaims {
            sub: "user-1".into(),
            email: "cook@example.com".into(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(26)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_access_token(&token, SECRET).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_access_token("not-a-jwt", SECRET).is_none());
    }
}
