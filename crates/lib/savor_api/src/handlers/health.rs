//! Liveness endpoint.

use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::extract::Json;
use crate::models::HealthResponse;

/// `GET /api/health`: report version, storage backend and provider setup.
///
/// Always 200; a failing store shows up as `storeConnected: false`.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "store ping failed");
            false
        }
    };
    Json(HealthResponse {
        status: "ok".into(),
        version: savor_core::version().into(),
        store: state.store.backend().into(),
        store_connected,
        recipe_provider_configured: state.recipes.is_configured(),
        generator_configured: state.generator.is_configured(),
    })
}
