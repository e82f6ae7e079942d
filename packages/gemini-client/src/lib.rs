//! Pure Gemini REST API client
//!
//! A minimal client for the `generateContent` endpoint. The redaction
//! pipeline sends a plain-text prompt and reads plain text back; no
//! tools, no streaming, no multimodal parts.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerationConfig};
//!
//! let client = GeminiClient::from_env()?.with_model("gemini-2.0-flash-001");
//! let text = client
//!     .generate_text("Summarize this document in 200 words:\n\n...", GenerationConfig {
//!         max_output_tokens: Some(200),
//!         temperature: Some(0.2),
//!     })
//!     .await?;
//! ```

pub mod types;

pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, response with no text)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.0-flash-001".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the model (default: gemini-2.0-flash-001).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Full generateContent call.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, "Gemini generateContent request");
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))
    }

    /// Single-prompt convenience: send text, get the first candidate's
    /// text back.
    pub async fn generate_text(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: Some(config),
        };

        let response = self.generate_content(request).await?;
        response
            .text()
            .ok_or_else(|| GeminiError::Parse("response contains no text".into()))
    }
}
