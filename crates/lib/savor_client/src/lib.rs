//! # savor_client
//!
//! Typed HTTP client for the Savor API.
//!
//! Authentication is explicit: [`SavorClient::register`] and
//! [`SavorClient::login`] return a [`Session`], and every call that needs a
//! signed-in user takes that session as an argument. The client itself holds
//! no credentials, so one client can serve many sessions.
//!
//! ```no_run
//! # async fn demo() -> Result<(), savor_client::ClientError> {
//! use savor_client::SavorClient;
//! use savor_core::models::recipes::NewSavedRecipe;
//!
//! let client = SavorClient::new("http://127.0.0.1:5000")?;
//! let session = client.login("cook@example.com", "hunter22!").await?;
//! let saved = client
//!     .save_recipe(
//!         &session,
//!         &NewSavedRecipe {
//!             recipe_id: "715538".into(),
//!             title: "Bruschetta".into(),
//!             image: String::new(),
//!             ready_in_minutes: Some(15),
//!             servings: Some(4),
//!         },
//!     )
//!     .await?;
//! println!("{} saved recipes", saved.len());
//! # Ok(())
//! # }
//! ```

mod session;

pub use session::Session;

use reqwest::header::{AUTHORIZATION, ETAG, IF_MATCH};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use savor_core::models::recipes::{GeneratedRecipe, NewSavedRecipe, ReorderEntry, SavedRecipe};
use savor_core::provider::spoonacular::{AutocompleteQuery, SearchQuery};

/// Errors returned by [`SavorClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{status} {error}: {message}")]
    Api {
        status: u16,
        error: String,
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected a write because the collection changed.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Deserialize)]
struct AuthBody {
    token: String,
}

/// Client for one Savor server.
#[derive(Debug, Clone)]
pub struct SavorClient {
    http: Client,
    base_url: url::Url,
}

impl SavorClient {
    /// Client with a default `reqwest::Client`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Client reusing an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = url::Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<url::Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.url(path)?))
    }

    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    /// Create an account and return a session for it.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate("api/auth/register", email, password).await
    }

    /// Sign in and return a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate("api/auth/login", email, password).await
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let resp = self
            .request(Method::POST, path)?
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: AuthBody = decode(resp).await?;
        debug!(path, "session established");
        Ok(Session::new(body.token))
    }

    // -----------------------------------------------------------------------
    // Saved recipes
    // -----------------------------------------------------------------------

    /// The session's saved recipes, sorted by `order`.
    pub async fn saved_recipes(&self, session: &Session) -> Result<Vec<SavedRecipe>, ClientError> {
        let req = self.request(Method::GET, "api/recipes/saved/all")?;
        self.collection_call(session, req, false).await
    }

    /// Save a recipe at the end of the collection.
    pub async fn save_recipe(
        &self,
        session: &Session,
        recipe: &NewSavedRecipe,
    ) -> Result<Vec<SavedRecipe>, ClientError> {
        let req = self.request(Method::POST, "api/recipes/save")?.json(recipe);
        self.collection_call(session, req, true).await
    }

    /// Rearrange the collection to follow `recipe_ids`.
    pub async fn reorder_recipes<S: AsRef<str>>(
        &self,
        session: &Session,
        recipe_ids: &[S],
    ) -> Result<Vec<SavedRecipe>, ClientError> {
        let recipes: Vec<ReorderEntry> = recipe_ids
            .iter()
            .map(|id| ReorderEntry {
                recipe_id: id.as_ref().to_string(),
            })
            .collect();
        let req = self
            .request(Method::PUT, "api/recipes/saved/reorder")?
            .json(&serde_json::json!({ "recipes": recipes }));
        self.collection_call(session, req, true).await
    }

    /// Remove a recipe from the collection.
    pub async fn remove_recipe(
        &self,
        session: &Session,
        recipe_id: &str,
    ) -> Result<Vec<SavedRecipe>, ClientError> {
        let mut url = self.url("api/recipes/saved")?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(recipe_id);
        }
        let req = self.http.request(Method::DELETE, url);
        self.collection_call(session, req, true).await
    }

    async fn collection_call(
        &self,
        session: &Session,
        req: RequestBuilder,
        mutating: bool,
    ) -> Result<Vec<SavedRecipe>, ClientError> {
        let mut req = req.header(AUTHORIZATION, session.bearer());
        if mutating && let Some(revision) = session.expected_revision() {
            req = req.header(IF_MATCH, format!("\"{revision}\""));
        }
        let resp = req.send().await?;
        if let Some(revision) = revision_from(&resp) {
            session.observe_revision(revision);
        }
        decode(resp).await
    }

    // -----------------------------------------------------------------------
    // Recipe discovery
    // -----------------------------------------------------------------------

    /// Provider search results, passed through as JSON.
    pub async fn search(&self, query: &SearchQuery) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .request(Method::GET, "api/recipes/search")?
            .query(query)
            .send()
            .await?;
        decode(resp).await
    }

    /// Title suggestions for a partial query.
    pub async fn autocomplete(
        &self,
        query: &AutocompleteQuery,
    ) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .request(Method::GET, "api/recipes/autocomplete")?
            .query(query)
            .send()
            .await?;
        decode(resp).await
    }

    /// Full provider information for one recipe.
    pub async fn recipe_information(
        &self,
        session: &Session,
        recipe_id: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let mut url = self.url("api/recipes")?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(recipe_id);
        }
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, session.bearer())
            .send()
            .await?;
        decode(resp).await
    }

    /// Generate a recipe and grocery list from a free-form prompt.
    pub async fn generate_recipe(
        &self,
        session: &Session,
        prompt: &str,
    ) -> Result<GeneratedRecipe, ClientError> {
        let resp = self
            .request(Method::POST, "api/recipes/generate")?
            .header(AUTHORIZATION, session.bearer())
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;
        decode(resp).await
    }

    /// Server health report.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self.request(Method::GET, "api/health")?.send().await?;
        decode(resp).await
    }
}

fn revision_from(resp: &Response) -> Option<i64> {
    let tag = resp.headers().get(ETAG)?.to_str().ok()?;
    tag.trim_start_matches("W/").trim_matches('"').parse().ok()
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let text = resp.text().await.unwrap_or_default();
    let (error, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.message),
        Err(_) => (
            status.canonical_reason().unwrap_or("error").to_string(),
            text,
        ),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        error,
        message,
    })
}
