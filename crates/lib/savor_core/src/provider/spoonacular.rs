//! Spoonacular recipe provider.
//!
//! Search, autocomplete, and recipe information. Responses are returned as
//! raw JSON; nothing is cached.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ProviderConfig, ProviderError, ensure_success, parse_base_url, with_segments};

/// Upper bound the provider accepts for `number`.
const MAX_RESULTS: u32 = 100;

fn default_search_number() -> u32 {
    10
}

fn default_autocomplete_number() -> u32 {
    5
}

/// Search parameters accepted from clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_search_number")]
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    /// Meal type (`main course`, `dessert`, …).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Autocomplete parameters accepted from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteQuery {
    pub query: String,
    #[serde(default = "default_autocomplete_number")]
    pub number: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams<'a> {
    #[serde(flatten)]
    query: &'a SearchQuery,
    add_recipe_information: bool,
}

/// Client for the Spoonacular recipe API.
#[derive(Debug, Clone)]
pub struct RecipeProvider {
    client: Client,
    base_url: url::Url,
    api_key: Option<String>,
}

impl RecipeProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client,
            base_url: parse_base_url(&config.spoonacular_base_url)?,
            api_key: config.spoonacular_api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("SPOONACULAR_API_KEY"))
    }

    /// `GET /recipes/complexSearch` with recipe information attached.
    pub async fn search(&self, query: &SearchQuery) -> Result<serde_json::Value, ProviderError> {
        let api_key = self.api_key()?;
        let query = SearchQuery {
            number: query.number.min(MAX_RESULTS),
            ..query.clone()
        };
        let url = with_segments(&self.base_url, &["recipes", "complexSearch"]);
        debug!(query = ?query.query, offset = query.offset, number = query.number, "recipe search");

        let resp = self
            .client
            .get(url)
            .header("x-api-key", api_key)
            .query(&SearchParams {
                query: &query,
                add_recipe_information: true,
            })
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `GET /recipes/autocomplete`.
    pub async fn autocomplete(
        &self,
        query: &AutocompleteQuery,
    ) -> Result<serde_json::Value, ProviderError> {
        let api_key = self.api_key()?;
        if query.query.trim().is_empty() {
            return Err(ProviderError::InvalidRequest("query is required".into()));
        }
        let number = query.number.min(MAX_RESULTS);
        let url = with_segments(&self.base_url, &["recipes", "autocomplete"]);

        let resp = self
            .client
            .get(url)
            .header("x-api-key", api_key)
            .query(&[("query", query.query.as_str())])
            .query(&[("number", number)])
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `GET /recipes/{id}/information`.
    pub async fn information(&self, recipe_id: &str) -> Result<serde_json::Value, ProviderError> {
        let api_key = self.api_key()?;
        validate_recipe_id(recipe_id)?;
        let url = with_segments(&self.base_url, &["recipes", recipe_id, "information"]);

        let resp = self
            .client
            .get(url)
            .header("x-api-key", api_key)
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }
}

/// Provider recipe ids are numeric.
fn validate_recipe_id(recipe_id: &str) -> Result<(), ProviderError> {
    if recipe_id.is_empty() || !recipe_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProviderError::InvalidRequest(format!(
            "invalid recipe id: {recipe_id:?}"
        )));
    }
    Ok(())
}
