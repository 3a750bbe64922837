// @zen-component: RCP-SavedRecipesEndpoint
//
//! Saved-recipe collection handlers.
//!
//! Every response carries the collection body plus `ETag: "<revision>"`.
//! Mutating requests may send `If-Match` with a revision previously seen;
//! a stale value fails with 409 and nothing is written.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::{ETAG, IF_MATCH};
use axum::response::{IntoResponse, Response};

use savor_core::models::recipes::{CollectionSnapshot, NewSavedRecipe};
use savor_core::recipes::service;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ReorderRequest;

/// `GET /api/recipes/saved/all`: the caller's collection, sorted by `order`.
pub async fn list_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Response> {
    let snapshot = service::list(state.store.as_ref(), user.user_id()).await?;
    Ok(collection_response(snapshot))
}

/// `POST /api/recipes/save`: append a recipe to the collection.
pub async fn save_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    headers: HeaderMap,
    Json(body): Json<NewSavedRecipe>,
) -> AppResult<Response> {
    let expected = expected_revision(&headers)?;
    let snapshot = service::save(state.store.as_ref(), user.user_id(), body, expected).await?;
    Ok(collection_response(snapshot))
}

/// `PUT /api/recipes/saved/reorder`: rearrange the collection.
pub async fn reorder_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    headers: HeaderMap,
    Json(body): Json<ReorderRequest>,
) -> AppResult<Response> {
    let expected = expected_revision(&headers)?;
    let snapshot =
        service::reorder(state.store.as_ref(), user.user_id(), &body.recipes, expected).await?;
    Ok(collection_response(snapshot))
}

/// `DELETE /api/recipes/saved/{recipeId}`: drop a recipe from the collection.
pub async fn remove_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    headers: HeaderMap,
    Path(recipe_id): Path<String>,
) -> AppResult<Response> {
    let expected = expected_revision(&headers)?;
    let snapshot =
        service::remove(state.store.as_ref(), user.user_id(), &recipe_id, expected).await?;
    Ok(collection_response(snapshot))
}

fn collection_response(snapshot: CollectionSnapshot) -> Response {
    (
        [(ETAG, format!("\"{}\"", snapshot.revision))],
        Json(snapshot.entries),
    )
        .into_response()
}

/// Read the revision from `If-Match`. Absent or `*` means no check.
fn expected_revision(headers: &HeaderMap) -> AppResult<Option<i64>> {
    let Some(value) = headers.get(IF_MATCH) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::Validation("If-Match must be ASCII".into()))?;
    parse_revision_tag(raw)
}

fn parse_revision_tag(raw: &str) -> AppResult<Option<i64>> {
    let tag = raw.trim();
    if tag == "*" {
        return Ok(None);
    }
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    let tag = tag
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(tag);
    tag.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("If-Match is not a revision: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_and_bare_revisions() {
        assert_eq!(parse_revision_tag("\"3\"").unwrap(), Some(3));
        assert_eq!(parse_revision_tag("W/\"4\"").unwrap(), Some(4));
        assert_eq!(parse_revision_tag(" 5 ").unwrap(), Some(5));
        assert_eq!(parse_revision_tag("*").unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_tags() {
        assert!(parse_revision_tag("\"abc\"").is_err());
        assert!(parse_revision_tag("").is_err());
    }

    #[test]
    fn missing_header_means_no_check() {
        assert_eq!(expected_revision(&HeaderMap::new()).unwrap(), None);
    }
}
