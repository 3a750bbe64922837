// @zen-component: AUTH-AccessControl
//
//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use savor_core::auth::jwt::verify_access_token;
use savor_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    /// Id of the authenticated user (`sub` claim).
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let claims = verify_access_token(token.trim(), state.config.jwt_secret.as_bytes())
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    debug!(user_id = %claims.sub, path = %request.uri().path(), "request authenticated");
    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
