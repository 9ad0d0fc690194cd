//! Application settings and configuration
//!
//! Settings are read from environment variables (optionally seeded from a
//! `.env` file) with defaults suitable for local development. The inference
//! credential is never given a default and is never serialized.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default Hugging Face model used for horoscope generation
pub const DEFAULT_MODEL_NAME: &str = "meta-llama/Llama-3.2-3B-Instruct";

/// Default Hugging Face Inference API base URL (model id is appended).
/// Requests go through the inference-provider router, not the retired
/// `api-inference.huggingface.co` host.
pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Text-generation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InferenceConfig {
    /// Hugging Face access token
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier passed with every generation request
    pub model_name: String,

    /// Upper bound on newly generated tokens
    pub max_new_tokens: u32,

    /// Base URL; the model identifier is appended as a path segment
    pub base_url: String,

    /// Request timeout applied by the HTTP client
    pub timeout_seconds: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            max_new_tokens: 200,
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Inference backend
    pub inference: InferenceConfig,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "horoscope-api"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .context("Invalid ENVIRONMENT value")?,
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "127.0.0.1"),
            port: env_or_default("PORT", "8000")
                .parse()
                .context("Invalid PORT value")?,

            inference: InferenceConfig {
                api_key: env::var("HF_API_KEY").ok().filter(|key| !key.trim().is_empty()),
                model_name: env_or_default("HF_MODEL_NAME", DEFAULT_MODEL_NAME),
                max_new_tokens: env_or_default("HF_MAX_NEW_TOKENS", "200")
                    .parse()
                    .context("Invalid HF_MAX_NEW_TOKENS value")?,
                base_url: env_or_default("HF_INFERENCE_URL", DEFAULT_INFERENCE_URL),
                timeout_seconds: env_or_default("HF_TIMEOUT_SECONDS", "120")
                    .parse()
                    .context("Invalid HF_TIMEOUT_SECONDS value")?,
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.inference.max_new_tokens == 0 {
            anyhow::bail!("HF_MAX_NEW_TOKENS must be > 0");
        }

        if self.inference.timeout_seconds == 0 {
            anyhow::bail!("HF_TIMEOUT_SECONDS must be > 0");
        }

        if self.inference.model_name.trim().is_empty() {
            anyhow::bail!("HF_MODEL_NAME must not be empty");
        }

        if self.inference.api_key.is_none() {
            tracing::warn!("HF_API_KEY is not set; the inference client cannot be created");
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "horoscope-api".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            inference: InferenceConfig::default(),
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
