//! Saved-recipe and generated-recipe models.
//!
//! Wire names are camelCase so the JSON shape matches what the web client
//! has always sent and received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Provider ids are numeric; clients send them either as JSON numbers or
/// as strings. Both are stored as strings.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// One entry of a user's saved-recipe collection.
///
/// `title`, `image`, `ready_in_minutes` and `servings` are snapshotted from
/// the recipe provider when the entry is saved and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub recipe_id: String,
    pub title: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// Position key; unique within a collection, zero-based.
    #[serde(default)]
    pub order: i64,
    pub added_at: DateTime<Utc>,
}

/// Fields a client supplies when saving a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedRecipe {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub recipe_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
}

/// Entry as it appears in a reorder payload.
///
/// Only `recipe_id` matters; anything else the client echoes back is
/// accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub recipe_id: String,
}

/// Collection contents together with the revision they were read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSnapshot {
    /// Entries sorted ascending by `order`.
    pub entries: Vec<SavedRecipe>,
    pub revision: i64,
}

/// Recipe produced by the generative-AI provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub recipe: String,
    #[serde(default)]
    pub grocery_items: Vec<GroceryItem>,
}

/// Shopping-list line of a generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub icon: String,
}
