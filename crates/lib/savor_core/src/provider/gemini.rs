//! Gemini recipe generator.
//!
//! Sends a meal description to `models/{model}:generateContent` with a
//! prompt that asks for a JSON object holding the recipe text and a
//! grocery list, then pulls that object out of the model's reply.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ProviderConfig, ProviderError, ensure_success, parse_base_url, with_segments};
use crate::models::recipes::GeneratedRecipe;

/// Longest meal description forwarded to the model.
pub const MAX_PROMPT_CHARS: usize = 2_000;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct RecipeGenerator {
    client: Client,
    base_url: url::Url,
    model: String,
    api_key: Option<String>,
}

impl RecipeGenerator {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client,
            base_url: parse_base_url(&config.gemini_base_url)?,
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a recipe and grocery list for a meal description.
    pub async fn generate(&self, meal_plan: &str) -> Result<GeneratedRecipe, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("GEMINI_API_KEY"))?;
        let meal_plan = meal_plan.trim();
        if meal_plan.is_empty() {
            return Err(ProviderError::InvalidRequest("prompt is required".into()));
        }
        if meal_plan.chars().count() > MAX_PROMPT_CHARS {
            return Err(ProviderError::InvalidRequest(format!(
                "prompt must be at most {MAX_PROMPT_CHARS} characters"
            )));
        }

        let method = format!("{}:generateContent", self.model);
        let url = with_segments(&self.base_url, &["models", method.as_str()]);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(meal_plan),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                top_p: 0.8,
                top_k: 40,
            },
        };
        debug!(model = %self.model, "requesting recipe generation");

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let data: GenerateResponse = ensure_success(resp).await?.json().await?;
        let text = reply_text(data)
            .ok_or_else(|| ProviderError::MalformedResponse("no candidate text".into()))?;
        parse_generated_recipe(&text)
    }
}

/// Prompt asking the model for a strict JSON reply.
pub fn build_prompt(meal_plan: &str) -> String {
    format!(
        r#"Generate a recipe and grocery list for the following meal plan: {meal_plan}.
YOU MUST return your response in the following JSON format ONLY:
{{
  "recipe": "recipe_instructions_here with all ingredients, steps, cooking time and servings",
  "groceryItems": [
    {{
      "id": "unique_id",
      "name": "item_name",
      "category": "item_category",
      "quantity": "amount_needed",
      "icon": "emoji_icon"
    }}
  ]
}}

DO NOT include any text or explanations before or after the JSON. ONLY return the JSON object."#
    )
}

fn reply_text(data: GenerateResponse) -> Option<String> {
    let content = data.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
}

/// Slice from the first `{` to the last `}`; models like to wrap JSON in
/// prose or markdown fences.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the model's reply text into a [`GeneratedRecipe`].
pub fn parse_generated_recipe(text: &str) -> Result<GeneratedRecipe, ProviderError> {
    let json = extract_json_object(text).ok_or_else(|| {
        warn!("generation reply contained no JSON object");
        ProviderError::MalformedResponse("no JSON object in reply".into())
    })?;
    serde_json::from_str(json)
        .map_err(|e| ProviderError::MalformedResponse(format!("reply JSON: {e}")))
}
