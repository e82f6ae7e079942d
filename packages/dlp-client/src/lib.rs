//! Pure Cloud DLP REST API client
//!
//! A clean, minimal client for the DLP v2 content methods the redaction
//! pipeline uses: `content:inspect` (sensitive-entity detection) and
//! `content:deidentify` (deterministic format-preserving encoding).
//! No domain-specific logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use dlp_client::{ContentItem, DlpClient, InfoType, InspectConfig, InspectRequest};
//!
//! let client = DlpClient::from_env()?;
//!
//! let result = client.inspect_content(InspectRequest {
//!     item: ContentItem::new("Reach me at jane@example.com"),
//!     inspect_config: InspectConfig {
//!         info_types: vec![InfoType::new("EMAIL_ADDRESS")],
//!         custom_info_types: vec![],
//!         include_quote: true,
//!     },
//! }).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{DlpError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

use crate::types::{DeidentifyResponse, InspectResponse};

/// Pure DLP API client.
#[derive(Clone)]
pub struct DlpClient {
    http_client: Client,
    access_token: String,
    project_id: String,
    base_url: String,
}

impl DlpClient {
    /// Create a new client with the given OAuth access token and
    /// project id.
    pub fn new(access_token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            access_token: access_token.into(),
            project_id: project_id.into(),
            base_url: "https://dlp.googleapis.com/v2".to_string(),
        }
    }

    /// Create from environment variables `GCP_ACCESS_TOKEN` and
    /// `GCP_PROJECT_ID`.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("GCP_ACCESS_TOKEN")
            .map_err(|_| DlpError::Config("GCP_ACCESS_TOKEN not set".into()))?;
        let project_id = std::env::var("GCP_PROJECT_ID")
            .map_err(|_| DlpError::Config("GCP_PROJECT_ID not set".into()))?;
        Ok(Self::new(access_token, project_id))
    }

    /// Set a custom base URL (for emulators, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Inspect content for sensitive entities.
    pub async fn inspect_content(&self, request: InspectRequest) -> Result<InspectResult> {
        let response: InspectResponse = self.post("content:inspect", &request).await?;
        debug!(findings = response.result.findings.len(), "DLP inspection complete");
        Ok(response.result)
    }

    /// De-identify content according to the supplied configuration.
    pub async fn deidentify_content(&self, request: DeidentifyRequest) -> Result<ContentItem> {
        let response: DeidentifyResponse = self.post("content:deidentify", &request).await?;
        Ok(response.item)
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R>
    where
        B: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}/projects/{}/{}", self.base_url, self.project_id, method);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, method, "DLP request failed");
                DlpError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, method, "DLP API error");
            return Err(DlpError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| DlpError::Parse(e.to_string()))
    }
}
