//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use savor_api::{AppState, config::ApiConfig};
use savor_core::provider::ProviderConfig;
use savor_core::store::memory::MemoryUserStore;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

/// Router over a fresh in-memory store with no providers configured.
pub fn app() -> Router {
    app_with_providers(ProviderConfig::default())
}

pub fn app_with_providers(providers: ProviderConfig) -> Router {
    let config = ApiConfig {
        providers,
        ..ApiConfig::with_secret(SECRET)
    };
    let state = AppState::new(Arc::new(MemoryUserStore::new()), config).expect("app state");
    savor_api::router(state)
}

/// Response reduced to what tests assert on.
pub struct TestResponse {
    pub status: StatusCode,
    pub etag: Option<String>,
    pub json: serde_json::Value,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    if_match: Option<&str>,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(tag) = if_match {
        req = req.header(header::IF_MATCH, tag);
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let etag = resp
        .headers()
        .get(header::ETAG)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    TestResponse { status, etag, json }
}

/// Register `email` and return its bearer token.
pub async fn register(app: &Router, email: &str) -> String {
    let resp = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        None,
        Some(serde_json::json!({"email": email, "password": "long-enough"})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED, "register: {:?}", resp.json);
    resp.json["token"].as_str().expect("token").to_string()
}

pub fn ids(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .expect("collection array")
        .iter()
        .map(|e| e["recipeId"].as_str().expect("recipeId").to_string())
        .collect()
}

pub fn orders(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .expect("collection array")
        .iter()
        .map(|e| e["order"].as_i64().expect("order"))
        .collect()
}
