// @zen-component: RCP-SavedCollection
//
//! Ordered saved-recipe collection.
//!
//! Entries are kept sorted by `order`. `recipe_id` and `order` are unique
//! within a collection. Save and reorder leave orders dense (`0..N-1`);
//! remove leaves the survivors' orders untouched, so gaps may appear until
//! the next save or reorder.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::RecipeError;
use crate::models::recipes::{NewSavedRecipe, ReorderEntry, SavedRecipe};

/// A user's saved recipes, sorted ascending by `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedCollection {
    entries: Vec<SavedRecipe>,
}

impl SavedCollection {
    /// Build from stored entries in any order.
    ///
    /// The sort is stable, so legacy data with repeated orders still lists
    /// deterministically (storage order breaks ties).
    pub fn from_entries(mut entries: Vec<SavedRecipe>) -> Self {
        entries.sort_by_key(|e| e.order);
        Self { entries }
    }

    pub fn entries(&self) -> &[SavedRecipe] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SavedRecipe> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.entries.iter().any(|e| e.recipe_id == recipe_id)
    }

    /// Append a new entry at the end.
    ///
    /// Existing entries are renumbered `0..N-1` first so that the new
    /// entry's `order = N` cannot collide with an order left behind by an
    /// earlier removal.
    pub fn save(
        &mut self,
        new: NewSavedRecipe,
        added_at: DateTime<Utc>,
    ) -> Result<&SavedRecipe, RecipeError> {
        let recipe_id = new.recipe_id.trim();
        if recipe_id.is_empty() {
            return Err(RecipeError::Validation("recipeId is required".into()));
        }
        if self.contains(recipe_id) {
            return Err(RecipeError::AlreadySaved(recipe_id.to_string()));
        }

        self.renumber();
        let entry = SavedRecipe {
            recipe_id: recipe_id.to_string(),
            title: new.title,
            image: new.image,
            ready_in_minutes: new.ready_in_minutes,
            servings: new.servings,
            order: self.entries.len() as i64,
            added_at,
        };
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Rearrange entries to follow `sequence`.
    ///
    /// `sequence` must name every saved recipe exactly once. Each entry's
    /// `order` becomes its index in `sequence`; the stored snapshot fields
    /// and `added_at` are kept.
    pub fn reorder(&mut self, sequence: &[ReorderEntry]) -> Result<(), RecipeError> {
        let mut remaining: HashMap<&str, &SavedRecipe> = self
            .entries
            .iter()
            .map(|e| (e.recipe_id.as_str(), e))
            .collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(sequence.len());
        let mut reordered = Vec::with_capacity(self.entries.len());

        for (index, item) in sequence.iter().enumerate() {
            let id = item.recipe_id.as_str();
            if !seen.insert(id) {
                return Err(RecipeError::Validation(format!(
                    "recipe {id} appears more than once"
                )));
            }
            let Some(stored) = remaining.remove(id) else {
                return Err(RecipeError::Validation(format!(
                    "recipe {id} is not in the saved collection"
                )));
            };
            reordered.push(SavedRecipe {
                order: index as i64,
                ..stored.clone()
            });
        }

        if !remaining.is_empty() {
            let mut missing: Vec<&str> = remaining.into_keys().collect();
            missing.sort_unstable();
            return Err(RecipeError::Validation(format!(
                "reorder must include every saved recipe; missing: {}",
                missing.join(", ")
            )));
        }

        self.entries = reordered;
        Ok(())
    }

    /// Remove the entry with `recipe_id`. Returns whether anything was removed.
    ///
    /// Survivors keep their `order` values.
    pub fn remove(&mut self, recipe_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.recipe_id != recipe_id);
        self.entries.len() != before
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.order = index as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe(id: &str) -> NewSavedRecipe {
        NewSavedRecipe {
            recipe_id: id.to_string(),
            title: format!("Recipe {id}"),
            image: format!("https://img.example/{id}.jpg"),
            ready_in_minutes: Some(30),
            servings: Some(2),
        }
    }

    fn reorder_entries(ids: &[&str]) -> Vec<ReorderEntry> {
        ids.iter()
            .map(|id| ReorderEntry {
                recipe_id: id.to_string(),
            })
            .collect()
    }

    fn collection_of(ids: &[&str]) -> SavedCollection {
        let mut coll = SavedCollection::default();
        for id in ids {
            coll.save(new_recipe(id), Utc::now()).unwrap();
        }
        coll
    }

    fn ids_and_orders(coll: &SavedCollection) -> Vec<(&str, i64)> {
        coll.entries()
            .iter()
            .map(|e| (e.recipe_id.as_str(), e.order))
            .collect()
    }

    #[test]
    fn save_appends_with_order_equal_to_length() {
        let mut coll = collection_of(&["a", "b"]);
        let saved = coll.save(new_recipe("c"), Utc::now()).unwrap();
        assert_eq!(saved.order, 2);
        assert_eq!(
            ids_and_orders(&coll),
            vec![("a", 0), ("b", 1), ("c", 2)]
        );
    }

    #[test]
    fn save_keeps_snapshot_fields() {
        let coll = collection_of(&["a"]);
        let entry = &coll.entries()[0];
        assert_eq!(entry.title, "Recipe a");
        assert_eq!(entry.image, "https://img.example/a.jpg");
        assert_eq!(entry.ready_in_minutes, Some(30));
        assert_eq!(entry.servings, Some(2));
    }

    #[test]
    fn duplicate_save_is_rejected_without_change() {
        let mut coll = collection_of(&["a", "b"]);
        let before = coll.clone();
        let err = coll.save(new_recipe("a"), Utc::now()).unwrap_err();
        assert!(matches!(err, RecipeError::AlreadySaved(id) if id == "a"));
        assert_eq!(coll, before);
    }

    #[test]
    fn blank_recipe_id_is_rejected() {
        let mut coll = SavedCollection::default();
        let err = coll.save(new_recipe("  "), Utc::now()).unwrap_err();
        assert!(matches!(err, RecipeError::Validation(_)));
        assert!(coll.is_empty());
    }

    #[test]
    fn recipe_id_is_trimmed_before_duplicate_check() {
        let mut coll = collection_of(&["a"]);
        let err = coll.save(new_recipe(" a "), Utc::now()).unwrap_err();
        assert!(matches!(err, RecipeError::AlreadySaved(_)));
    }

    #[test]
    fn from_entries_sorts_by_order() {
        let mut entries = collection_of(&["a", "b", "c"]).into_entries();
        entries.reverse();
        let coll = SavedCollection::from_entries(entries);
        assert_eq!(
            ids_and_orders(&coll),
            vec![("a", 0), ("b", 1), ("c", 2)]
        );
    }

    #[test]
    fn reorder_assigns_positional_orders() {
        let mut coll = collection_of(&["a", "b", "c"]);
        coll.reorder(&reorder_entries(&["c", "a", "b"])).unwrap();
        assert_eq!(
            ids_and_orders(&coll),
            vec![("c", 0), ("a", 1), ("b", 2)]
        );
    }

    #[test]
    fn reorder_keeps_stored_fields() {
        let mut coll = collection_of(&["a", "b"]);
        let added_at = coll.entries()[0].added_at;
        coll.reorder(&reorder_entries(&["b", "a"])).unwrap();
        let a = coll.entries().iter().find(|e| e.recipe_id == "a").unwrap();
        assert_eq!(a.title, "Recipe a");
        assert_eq!(a.added_at, added_at);
    }

    #[test]
    fn reorder_rejects_missing_entry() {
        let mut coll = collection_of(&["a", "b", "c"]);
        let before = coll.clone();
        let err = coll.reorder(&reorder_entries(&["c", "a"])).unwrap_err();
        match err {
            RecipeError::Validation(msg) => assert!(msg.contains("missing: b"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(coll, before);
    }

    #[test]
    fn reorder_rejects_foreign_entry() {
        let mut coll = collection_of(&["a", "b"]);
        let before = coll.clone();
        let err = coll.reorder(&reorder_entries(&["a", "zzz"])).unwrap_err();
        assert!(matches!(err, RecipeError::Validation(msg) if msg.contains("zzz")));
        assert_eq!(coll, before);
    }

    #[test]
    fn reorder_rejects_duplicate_entry() {
        let mut coll = collection_of(&["a", "b"]);
        let err = coll.reorder(&reorder_entries(&["a", "a"])).unwrap_err();
        assert!(matches!(err, RecipeError::Validation(msg) if msg.contains("more than once")));
    }

    #[test]
    fn reorder_of_empty_collection_with_empty_sequence_succeeds() {
        let mut coll = SavedCollection::default();
        coll.reorder(&[]).unwrap();
        assert!(coll.is_empty());
    }

    #[test]
    fn remove_leaves_gap_and_relative_order() {
        let mut coll = collection_of(&["a", "b", "c"]);
        assert!(coll.remove("b"));
        assert_eq!(ids_and_orders(&coll), vec![("a", 0), ("c", 2)]);
    }

    #[test]
    fn remove_of_unknown_id_is_noop() {
        let mut coll = collection_of(&["a"]);
        assert!(!coll.remove("zzz"));
        assert_eq!(coll.len(), 1);
    }

    #[test]
    fn save_after_remove_closes_gaps() {
        let mut coll = collection_of(&["a", "b", "c"]);
        coll.remove("a");
        coll.save(new_recipe("d"), Utc::now()).unwrap();
        assert_eq!(
            ids_and_orders(&coll),
            vec![("b", 0), ("c", 1), ("d", 2)]
        );
    }

    #[test]
    fn orders_and_ids_stay_unique_through_mixed_operations() {
        let mut coll = collection_of(&["a", "b", "c", "d"]);
        coll.remove("b");
        coll.save(new_recipe("e"), Utc::now()).unwrap();
        coll.reorder(&reorder_entries(&["e", "d", "c", "a"])).unwrap();
        coll.remove("d");
        coll.save(new_recipe("f"), Utc::now()).unwrap();

        let ids: HashSet<_> = coll.entries().iter().map(|e| &e.recipe_id).collect();
        let orders: HashSet<_> = coll.entries().iter().map(|e| e.order).collect();
        assert_eq!(ids.len(), coll.len());
        assert_eq!(orders.len(), coll.len());
        assert!(coll.entries().windows(2).all(|w| w[0].order < w[1].order));
    }
}
