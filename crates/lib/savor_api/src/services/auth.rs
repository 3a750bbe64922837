// @zen-component: AUTH-CredentialService
//
//! Account flows: register and login, delegating to `savor_core::auth`.

use tracing::{info, warn};

use savor_core::auth::jwt::generate_access_token;
use savor_core::auth::password::{hash_password, verify_password};
use savor_core::auth::{AuthError, normalize_email, validate_registration};
use savor_core::store::UserStore;

use crate::error::AppResult;
use crate::models::AuthResponse;

/// Register a new account and sign it in.
pub async fn register(
    store: &dyn UserStore,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<AuthResponse> {
    let email = normalize_email(email);
    validate_registration(&email, password)?;

    // Cheap pre-check; the store's unique constraint is authoritative.
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AuthError::DuplicateEmail.into());
    }

    let pw_hash = hash_password(password)?;
    let user = store.create_user(&email, &pw_hash).await.map_err(AuthError::from)?;
    let token = generate_access_token(&user.id, &user.email, jwt_secret)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthResponse {
        message: "User registered successfully".into(),
        token,
    })
}

/// Authenticate with email + password.
///
/// Unknown email and wrong password fail with the same generic error.
pub async fn login(
    store: &dyn UserStore,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<AuthResponse> {
    let email = normalize_email(email);
    let Some(user) = store.find_user_by_email(&email).await? else {
        warn!(email = %email, "login for unknown email");
        return Err(AuthError::CredentialError.into());
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::CredentialError.into());
    }

    let token = generate_access_token(&user.id, &user.email, jwt_secret)?;
    info!(user_id = %user.id, "user logged in");
    Ok(AuthResponse {
        message: "Login successful".into(),
        token,
    })
}
