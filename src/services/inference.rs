//! Text-generation collaborator
//!
//! Defines the [`TextGenerator`] seam used by the horoscope service and the
//! production implementation backed by the Hugging Face Inference API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::InferenceConfig;
use crate::schemas::inference::{GenerationParameters, TextGenerationRequest};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when calling the inference backend
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Missing API key")]
    MissingApiKey,
}

// ============================================================================
// Generator seam
// ============================================================================

/// Output of a single generation call.
///
/// Backends may answer with something other than plain text (token details,
/// an unexpected JSON shape); that case is kept as `NonText` instead of
/// being treated as a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Text(String),
    NonText(Value),
}

impl Generation {
    /// Classify a decoded response body
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Generation::Text(text),
            Value::Array(ref items) => match items.first().and_then(generated_text) {
                Some(text) => Generation::Text(text),
                None => Generation::NonText(value),
            },
            Value::Object(_) => match generated_text(&value) {
                Some(text) => Generation::Text(text),
                None => Generation::NonText(value),
            },
            other => Generation::NonText(other),
        }
    }
}

fn generated_text(value: &Value) -> Option<String> {
    value
        .get("generated_text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_new_tokens: u32,
    ) -> Result<Generation, InferenceError>;
}

// ============================================================================
// Hugging Face client
// ============================================================================

/// Client for the Hugging Face Inference API text-generation task
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HuggingFaceClient {
    /// Create a new client from the inference configuration
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(InferenceError::MissingApiKey),
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "Initialized Hugging Face inference client"
        );

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_new_tokens: u32,
    ) -> Result<Generation, InferenceError> {
        let url = self.model_url(model);
        let request = TextGenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens,
                return_full_text: false,
            },
        };

        tracing::debug!(model = %model, url = %url, "Calling Hugging Face text-generation API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(%status, body = %body, "Hugging Face API error");
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, body = %body, "Failed to parse Hugging Face response");
            InferenceError::Parse(e.to_string())
        })?;

        Ok(Generation::from_json(value))
    }
}

/// Pull the `error` field out of an error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| body.to_string())
}
