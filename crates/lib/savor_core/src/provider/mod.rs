// @zen-component: PRV-ExternalProviders
//
//! Clients for the external recipe and generative-AI providers.
//!
//! - [`spoonacular::RecipeProvider`]: recipe search, autocomplete, detail
//! - [`gemini::RecipeGenerator`]: free-form recipe generation
//!
//! Provider payloads are passed through opaquely except for generation,
//! whose reply is parsed into [`crate::models::recipes::GeneratedRecipe`].

pub mod gemini;
pub mod spoonacular;

use std::time::Duration;

use reqwest::Response;
use thiserror::Error;

/// Default Spoonacular API base URL.
pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Errors from external provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid provider configuration: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Provider endpoints and credentials.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub spoonacular_base_url: String,
    pub spoonacular_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Reads provider settings from environment variables.
    ///
    /// | Variable                 | Default                                   |
    /// |--------------------------|-------------------------------------------|
    /// | `SPOONACULAR_BASE_URL`   | `https://api.spoonacular.com`             |
    /// | `SPOONACULAR_API_KEY`    | unset (recipe proxy disabled)             |
    /// | `GEMINI_BASE_URL`        | Google Generative Language v1beta         |
    /// | `GEMINI_MODEL`           | `gemini-1.5-flash`                        |
    /// | `GEMINI_API_KEY`         | unset (generation disabled)               |
    /// | `PROVIDER_TIMEOUT_SECS`  | `10`                                      |
    pub fn from_env() -> Self {
        Self {
            spoonacular_base_url: env_or("SPOONACULAR_BASE_URL", DEFAULT_SPOONACULAR_BASE_URL),
            spoonacular_api_key: env_non_empty("SPOONACULAR_API_KEY"),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_key: env_non_empty("GEMINI_API_KEY"),
            timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Build the shared HTTP client used by both providers.
    pub fn http_client(&self) -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProviderError::Http)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            spoonacular_base_url: DEFAULT_SPOONACULAR_BASE_URL.to_string(),
            spoonacular_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env_non_empty(name).unwrap_or_else(|| default.to_string())
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_base_url(raw: &str) -> Result<url::Url, ProviderError> {
    let url = url::Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ProviderError::Config(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ProviderError::Config(format!("invalid base URL {raw:?}")));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one.
fn with_segments(base: &url::Url, segments: &[&str]) -> url::Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Turn a non-success response into [`ProviderError::Status`].
async fn ensure_success(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    })
}
