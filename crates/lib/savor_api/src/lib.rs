//! # savor_api
//!
//! HTTP API library for Savor.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use savor_core::provider::ProviderError;
use savor_core::provider::gemini::RecipeGenerator;
use savor_core::provider::spoonacular::RecipeProvider;
use savor_core::store::UserStore;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, recipes, saved};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User and collection storage.
    pub store: Arc<dyn UserStore>,
    /// API configuration.
    pub config: ApiConfig,
    /// Recipe search / detail provider.
    pub recipes: RecipeProvider,
    /// Generative recipe provider.
    pub generator: RecipeGenerator,
}

impl AppState {
    /// Build state with provider clients sharing one HTTP client.
    pub fn new(store: Arc<dyn UserStore>, config: ApiConfig) -> Result<Self, ProviderError> {
        let client = config.providers.http_client()?;
        let recipes = RecipeProvider::new(client.clone(), &config.providers)?;
        let generator = RecipeGenerator::new(client, &config.providers)?;
        Ok(Self {
            store,
            config,
            recipes,
            generator,
        })
    }
}

/// Run embedded database migrations.
///
/// Delegates to `savor_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    savor_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_API_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::GET_API_RECIPES_SEARCH, get(recipes::search_handler))
        .route(
            routes::GET_API_RECIPES_AUTOCOMPLETE,
            get(recipes::autocomplete_handler),
        );

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_API_RECIPES_ID, get(recipes::information_handler))
        .route(
            routes::POST_API_RECIPES_GENERATE,
            post(recipes::generate_handler),
        )
        .route(routes::POST_API_RECIPES_SAVE, post(saved::save_handler))
        .route(routes::GET_API_RECIPES_SAVED_ALL, get(saved::list_handler))
        .route(
            routes::PUT_API_RECIPES_SAVED_REORDER,
            put(saved::reorder_handler),
        )
        .route(
            routes::DELETE_API_RECIPES_SAVED_RECIPE_ID,
            delete(saved::remove_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
