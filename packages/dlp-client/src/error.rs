//! Error types for the DLP client.

use thiserror::Error;

/// Result type for DLP client operations.
pub type Result<T> = std::result::Result<T, DlpError>;

/// DLP client errors.
#[derive(Debug, Error)]
pub enum DlpError {
    /// Configuration error (missing token or project, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
