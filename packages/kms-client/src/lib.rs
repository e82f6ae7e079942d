//! Minimal Cloud KMS REST client
//!
//! Covers the one operation the redaction pipeline needs from a master
//! key service: wrapping a data key under a named crypto key
//! (`:encrypt`). Unwrapping never happens on this side of the trust
//! boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use kms_client::KmsClient;
//!
//! let client = KmsClient::from_env()?;
//! let ciphertext = client
//!     .encrypt("projects/p/locations/l/keyRings/r/cryptoKeys/k", &data_key)
//!     .await?;
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result type for KMS client operations.
pub type Result<T> = std::result::Result<T, KmsError>;

/// KMS client errors.
#[derive(Debug, thiserror::Error)]
pub enum KmsError {
    /// Configuration error (missing token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, invalid base64)
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct EncryptRequest {
    plaintext: String,
}

#[derive(Debug, Deserialize)]
struct EncryptResponse {
    ciphertext: String,
}

/// Cloud KMS REST API client.
#[derive(Clone)]
pub struct KmsClient {
    http_client: Client,
    access_token: String,
    base_url: String,
}

impl KmsClient {
    /// Create a new client with the given OAuth access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            access_token: access_token.into(),
            base_url: "https://cloudkms.googleapis.com/v1".to_string(),
        }
    }

    /// Create from environment variable `GCP_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("GCP_ACCESS_TOKEN")
            .map_err(|_| KmsError::Config("GCP_ACCESS_TOKEN not set".into()))?;
        Ok(Self::new(access_token))
    }

    /// Set a custom base URL (for emulators, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Encrypt (wrap) `plaintext` under the crypto key named by
    /// `key_name` (full resource path), returning raw ciphertext bytes.
    pub async fn encrypt(&self, key_name: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        let body = EncryptRequest {
            plaintext: BASE64.encode(plaintext),
        };

        debug!(key_name, "KMS encrypt request");
        let response = self
            .http_client
            .post(format!("{}/{}:encrypt", self.base_url, key_name))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "KMS request failed");
                KmsError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "KMS API error");
            return Err(KmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<EncryptResponse>()
            .await
            .map_err(|e| KmsError::Parse(e.to_string()))?;

        BASE64
            .decode(parsed.ciphertext.as_bytes())
            .map_err(|e| KmsError::Parse(format!("invalid ciphertext base64: {}", e)))
    }
}
