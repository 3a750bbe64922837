//! Integration test: run the API on an ephemeral port with an in-memory
//! store and drive it through `SavorClient`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use savor_api::{AppState, config::ApiConfig};
use savor_client::{SavorClient, Session};
use savor_core::models::recipes::NewSavedRecipe;
use savor_core::provider::ProviderConfig;
use savor_core::provider::spoonacular::SearchQuery;
use savor_core::store::memory::MemoryUserStore;
use serde_json::json;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_server_with(providers: ProviderConfig) -> String {
    let config = ApiConfig {
        providers,
        ..ApiConfig::with_secret("client-test-secret")
    };
    let state = AppState::new(Arc::new(MemoryUserStore::new()), config).expect("app state");
    serve(savor_api::router(state)).await
}

async fn spawn_server() -> String {
    spawn_server_with(ProviderConfig::default()).await
}

/// Stand-in for the recipe and generation providers.
async fn spawn_upstream() -> String {
    let upstream = Router::new()
        .route(
            "/recipes/complexSearch",
            get(
                |Query(params): Query<std::collections::HashMap<String, String>>| async move {
                    axum::Json(json!({
                        "results": [{"id": 7, "title": params.get("query").cloned().unwrap_or_default()}],
                        "cuisine": params.get("cuisine"),
                    }))
                },
            ),
        )
        .route(
            "/recipes/{id}/information",
            get(|Path(id): Path<String>| async move {
                axum::Json(json!({"id": id, "title": "Soup"}))
            }),
        )
        .route(
            "/models/{method}",
            post(|| async {
                let text = r#"Here you go: {"recipe": "Toast bread.", "groceryItems": [{"name": "Bread"}]}"#;
                axum::Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
            }),
        );
    serve(upstream).await
}

fn recipe(id: &str) -> NewSavedRecipe {
    NewSavedRecipe {
        recipe_id: id.into(),
        title: format!("Recipe {id}"),
        image: String::new(),
        ready_in_minutes: None,
        servings: Some(2),
    }
}

#[tokio::test]
async fn session_round_trip() {
    let client = SavorClient::new(&spawn_server().await).unwrap();
    let session = client.register("cook@example.com", "long-enough").await.unwrap();

    assert!(client.saved_recipes(&session).await.unwrap().is_empty());
    assert_eq!(session.last_revision(), Some(0));

    client.save_recipe(&session, &recipe("1")).await.unwrap();
    client.save_recipe(&session, &recipe("2")).await.unwrap();
    let saved = client.reorder_recipes(&session, &["2", "1"]).await.unwrap();
    let ids: Vec<_> = saved.iter().map(|r| r.recipe_id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(saved[0].servings, Some(2));

    let saved = client.remove_recipe(&session, "2").await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].order, 1);
    assert_eq!(session.last_revision(), Some(4));

    let again = client.login("cook@example.com", "long-enough").await.unwrap();
    assert_eq!(client.saved_recipes(&again).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stale_session_write_is_a_conflict() {
    let client = SavorClient::new(&spawn_server().await).unwrap();
    let first = client
        .register("shared@example.com", "long-enough")
        .await
        .unwrap()
        .with_revision_checks();
    let second = Session::new(first.token()).with_revision_checks();

    client.saved_recipes(&first).await.unwrap();
    client.saved_recipes(&second).await.unwrap();

    client.save_recipe(&first, &recipe("1")).await.unwrap();
    let err = client.save_recipe(&second, &recipe("2")).await.unwrap_err();
    assert!(err.is_conflict(), "{err}");

    client.saved_recipes(&second).await.unwrap();
    client.save_recipe(&second, &recipe("2")).await.unwrap();
    assert_eq!(client.saved_recipes(&first).await.unwrap().len(), 2);
}

#[tokio::test]
async fn api_errors_carry_status_and_kind() {
    let client = SavorClient::new(&spawn_server().await).unwrap();
    let err = client
        .login("nobody@example.com", "long-enough")
        .await
        .unwrap_err();
    match err {
        savor_client::ClientError::Api { status, error, .. } => {
            assert_eq!(status, 401);
            assert_eq!(error, "unauthorized");
        }
        other => panic!("unexpected error: {other}"),
    }

    let health = client.health().await.unwrap();
    assert_eq!(health["store"], "memory");
}

#[tokio::test]
async fn provider_calls_go_through_the_api() {
    let upstream = spawn_upstream().await;
    let base = spawn_server_with(ProviderConfig {
        spoonacular_base_url: upstream.clone(),
        spoonacular_api_key: Some("spoon-key".into()),
        gemini_base_url: upstream,
        gemini_api_key: Some("gemini-key".into()),
        ..ProviderConfig::default()
    })
    .await;
    let client = SavorClient::new(&base).unwrap();

    let found = client
        .search(&SearchQuery {
            query: Some("pasta".into()),
            cuisine: Some("italian".into()),
            number: 10,
            ..SearchQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(found["results"][0]["title"], "pasta");
    assert_eq!(found["cuisine"], "italian");

    let session = client.register("chef@example.com", "long-enough").await.unwrap();
    let detail = client.recipe_information(&session, "42").await.unwrap();
    assert_eq!(detail["id"], "42");

    let generated = client.generate_recipe(&session, "quick breakfast").await.unwrap();
    assert_eq!(generated.recipe, "Toast bread.");
    assert_eq!(generated.grocery_items[0].name, "Bread");

    let err = client
        .recipe_information(&Session::new("not-a-token"), "42")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}
