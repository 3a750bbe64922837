//! # savor_core
//!
//! Core domain logic for Savor: users, saved-recipe collections, auth
//! primitives, and clients for the external recipe and AI providers.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod provider;
pub mod recipes;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
