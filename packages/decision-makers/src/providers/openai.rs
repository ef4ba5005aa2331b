//! OpenAI implementation of the field extractor.
//!
//! A reference extraction engine using chat completions in JSON mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use decision_makers::providers::OpenAIExtractor;
//!
//! let extractor = OpenAIExtractor::new("sk-...").with_model("gpt-4o");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DiscoveryError, Result};
use crate::pipeline::prompts::format_field_list;
use crate::security::SecretString;
use crate::traits::extractor::FieldExtractor;
use crate::types::{
    context::{keys, EnrichmentContext},
    field::Field,
    result::{EnrichmentResult, Enrichments},
};

/// OpenAI-based extraction engine.
#[derive(Clone)]
pub struct OpenAIExtractor {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAIExtractor {
    /// Create a new extractor with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = SecretString::from_env("OPENAI_API_KEY")?;
        Ok(Self::new(api_key.expose()))
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_json(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", self.api_key.bearer())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DiscoveryError::Extraction(Box::new(e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Extraction(
                format!("OpenAI API error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Extraction(Box::new(e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| DiscoveryError::Extraction("No response from OpenAI".into()))
    }
}

/// System prompt: verification policy, identity context and output contract.
fn build_system_prompt(fields: &[Field], context: &EnrichmentContext) -> Result<String> {
    let instructions = context.instructions().unwrap_or_default();

    let mut identity = context.as_map().clone();
    identity.remove(keys::INSTRUCTIONS);
    let identity = serde_json::to_string_pretty(&identity)?;

    Ok(format!(
        r#"{instructions}

Context:
{identity}

Fields to extract:
{fields}

Output a JSON object keyed by field name. Each value is an object:
{{"value": <the extracted value, or "" if not found>, "source": "<URL supporting the value>"}}"#,
        instructions = instructions,
        identity = identity,
        fields = format_field_list(fields),
    ))
}

/// Parse the model output, keeping only requested field names.
fn parse_enrichments(raw: &str, fields: &[Field]) -> Result<Enrichments> {
    let parsed: serde_json::Map<String, Value> = serde_json::from_str(raw)?;

    let mut results = Enrichments::new();
    for field in fields {
        let Some(entry) = parsed.get(&field.name) else {
            continue;
        };

        let result = match entry {
            Value::Object(_) => serde_json::from_value::<EnrichmentResult>(entry.clone())?,
            other => EnrichmentResult::new(other.clone()),
        };
        results.insert(field.name.clone(), result);
    }

    Ok(results)
}

#[async_trait]
impl FieldExtractor for OpenAIExtractor {
    async fn extract(
        &self,
        evidence: &str,
        fields: &[Field],
        context: &EnrichmentContext,
    ) -> Result<Enrichments> {
        let system = build_system_prompt(fields, context)?;
        let user = format!("Evidence:\n\n{}", evidence);

        let raw = self.chat_json(&system, &user).await?;
        parse_enrichments(&raw, fields)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
