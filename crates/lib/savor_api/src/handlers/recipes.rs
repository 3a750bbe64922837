//! Recipe provider proxy and AI generation handlers.

use axum::extract::State;

use savor_core::models::recipes::GeneratedRecipe;
use savor_core::provider::spoonacular::{AutocompleteQuery, SearchQuery};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::GenerateRequest;

/// `GET /api/recipes/search`: complex search, passed through.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.recipes.search(&query).await?))
}

/// `GET /api/recipes/autocomplete`: title suggestions, passed through.
pub async fn autocomplete_handler(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.recipes.autocomplete(&query).await?))
}

/// `GET /api/recipes/{id}`: full recipe information.
pub async fn information_handler(
    State(state): State<AppState>,
    axum::Extension(_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.recipes.information(&id).await?))
}

/// `POST /api/recipes/generate`: recipe and grocery list from a prompt.
pub async fn generate_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<GeneratedRecipe>> {
    tracing::info!(user_id = %user.user_id(), "generating recipe");
    Ok(Json(state.generator.generate(&body.prompt).await?))
}
