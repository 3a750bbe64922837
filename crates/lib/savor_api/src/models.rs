//! Request and response bodies of the HTTP API.
//!
//! Collection entries reuse the domain types from `savor_core::models`.

use serde::{Deserialize, Serialize};

use savor_core::models::recipes::ReorderEntry;

/// Error body returned by every failing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /api/auth/register` and `POST /api/auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// `PUT /api/recipes/saved/reorder` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub recipes: Vec<ReorderEntry>,
}

/// `POST /api/recipes/generate` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
    pub store_connected: bool,
    pub recipe_provider_configured: bool,
    pub generator_configured: bool,
}
