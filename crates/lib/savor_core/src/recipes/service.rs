// @zen-component: RCP-CollectionService
//
//! Saved-recipe collection operations: save, list, reorder, remove.
//!
//! Every operation loads the caller's record, applies the change to a
//! [`SavedCollection`], and writes it back with a compare-and-swap on the
//! revision it read. Callers may also pass the revision they last saw
//! (`expected_revision`); a mismatch fails before anything is changed.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::RecipeError;
use super::collection::SavedCollection;
use crate::models::recipes::{CollectionSnapshot, NewSavedRecipe, ReorderEntry};
use crate::store::UserStore;

/// List the caller's saved recipes, sorted by `order`.
pub async fn list(store: &dyn UserStore, user_id: &str) -> Result<CollectionSnapshot, RecipeError> {
    let (collection, revision) = load(store, user_id, None).await?;
    Ok(CollectionSnapshot {
        entries: collection.into_entries(),
        revision,
    })
}

/// Save a recipe at the end of the caller's collection.
pub async fn save(
    store: &dyn UserStore,
    user_id: &str,
    recipe: NewSavedRecipe,
    expected_revision: Option<i64>,
) -> Result<CollectionSnapshot, RecipeError> {
    let (mut collection, revision) = load(store, user_id, expected_revision).await?;
    let recipe_id = collection.save(recipe, Utc::now())?.recipe_id.clone();
    let snapshot = commit(store, user_id, revision, collection).await?;
    info!(user_id, recipe_id = %recipe_id, revision = snapshot.revision, "recipe saved");
    Ok(snapshot)
}

/// Rearrange the caller's collection to follow `sequence`.
pub async fn reorder(
    store: &dyn UserStore,
    user_id: &str,
    sequence: &[ReorderEntry],
    expected_revision: Option<i64>,
) -> Result<CollectionSnapshot, RecipeError> {
    let (mut collection, revision) = load(store, user_id, expected_revision).await?;
    collection.reorder(sequence)?;
    let snapshot = commit(store, user_id, revision, collection).await?;
    info!(
        user_id,
        count = snapshot.entries.len(),
        revision = snapshot.revision,
        "saved recipes reordered"
    );
    Ok(snapshot)
}

/// Remove a recipe from the caller's collection.
///
/// Removing a recipe that is not saved returns the collection unchanged
/// without writing.
pub async fn remove(
    store: &dyn UserStore,
    user_id: &str,
    recipe_id: &str,
    expected_revision: Option<i64>,
) -> Result<CollectionSnapshot, RecipeError> {
    let (mut collection, revision) = load(store, user_id, expected_revision).await?;
    if !collection.remove(recipe_id) {
        debug!(user_id, recipe_id, "recipe not in collection, nothing to remove");
        return Ok(CollectionSnapshot {
            entries: collection.into_entries(),
            revision,
        });
    }
    let snapshot = commit(store, user_id, revision, collection).await?;
    info!(user_id, recipe_id, revision = snapshot.revision, "recipe removed");
    Ok(snapshot)
}

// ---------------------------------------------------------------------------
// Load / commit
// ---------------------------------------------------------------------------

async fn load(
    store: &dyn UserStore,
    user_id: &str,
    expected_revision: Option<i64>,
) -> Result<(SavedCollection, i64), RecipeError> {
    let stored = store
        .load_collection(user_id)
        .await?
        .ok_or_else(|| RecipeError::NotFound(user_id.to_string()))?;

    if let Some(expected) = expected_revision
        && expected != stored.revision
    {
        return Err(RecipeError::RevisionConflict {
            expected,
            actual: stored.revision,
        });
    }

    Ok((SavedCollection::from_entries(stored.entries), stored.revision))
}

async fn commit(
    store: &dyn UserStore,
    user_id: &str,
    read_revision: i64,
    collection: SavedCollection,
) -> Result<CollectionSnapshot, RecipeError> {
    match store
        .replace_collection(user_id, read_revision, collection.entries())
        .await?
    {
        Some(revision) => Ok(CollectionSnapshot {
            entries: collection.into_entries(),
            revision,
        }),
        None => {
            let actual = store
                .load_collection(user_id)
                .await?
                .ok_or_else(|| RecipeError::NotFound(user_id.to_string()))?
                .revision;
            warn!(
                user_id,
                expected = read_revision,
                actual,
                "collection changed during update"
            );
            Err(RecipeError::RevisionConflict {
                expected: read_revision,
                actual,
            })
        }
    }
}
