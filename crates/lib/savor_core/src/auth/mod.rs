//! Authentication primitives.
//!
//! Password hashing, JWT management, and credential checks shared by the
//! account flows in `savor_api`.

pub mod jwt;
pub mod password;

use thiserror::Error;

use crate::store::StoreError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User already exists")]
    DuplicateEmail,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            other => AuthError::Store(other),
        }
    }
}

/// Emails are case-insensitive: compare and store them trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check registration input. `email` must already be normalized.
pub fn validate_registration(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() {
        return Err(AuthError::ValidationError("Email is required".into()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(AuthError::ValidationError("Email is not valid".into())),
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::ValidationError(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
