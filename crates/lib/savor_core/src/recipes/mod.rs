//! Saved-recipe collections.
//!
//! [`collection::SavedCollection`] holds the ordering rules; [`service`]
//! runs them against a [`crate::store::UserStore`] with revision checks.

pub mod collection;
pub mod service;

use thiserror::Error;

use crate::store::StoreError;

/// Saved-recipe collection errors.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Recipe already saved: {0}")]
    AlreadySaved(String),

    #[error("Collection changed: expected revision {expected}, found {actual}")]
    RevisionConflict { expected: i64, actual: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
