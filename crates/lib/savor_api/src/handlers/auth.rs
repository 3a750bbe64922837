// @zen-component: AUTH-LoginEndpoint
// @zen-component: AUTH-RegistrationEndpoint
//
//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::Json;
use crate::models::{AuthResponse, CredentialsRequest};
use crate::services::auth;

/// `POST /api/auth/register`: create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let resp = auth::register(
        state.store.as_ref(),
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/auth/login`: authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let resp = auth::login(
        state.store.as_ref(),
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}
