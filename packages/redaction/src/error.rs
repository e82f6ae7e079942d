//! Typed errors for the redaction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Collaborator-facing
//! errors (`KeyServiceError`, `DetectionError`, ...) are what trait
//! implementations return; `RedactionError` is what pipeline callers see.

use thiserror::Error;

/// Errors that can occur during redaction pipeline operations.
///
/// Every variant aborts the request it occurred in. The core never
/// retries and never returns partial results.
#[derive(Debug, Error)]
pub enum RedactionError {
    /// Master key service could not be reached or failed internally
    #[error("key service unavailable: {0}")]
    KeyServiceUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Master key service refused to wrap the data key
    #[error("key service denied the wrap request: {reason}")]
    KeyServiceDenied { reason: String },

    /// External classifier failed; caller may retry or abort,
    /// never skip detection and pass raw text through
    #[error("detection unavailable: {0}")]
    DetectionUnavailable(#[from] DetectionError),

    /// Two detected spans overlap; precedence is never guessed
    #[error("overlapping spans: {first} overlaps {second}")]
    OverlappingSpans { first: String, second: String },

    /// Remote format-preserving encoding call failed
    #[error("transform primitive failed: {0}")]
    TransformPrimitive(#[from] EncodeError),

    /// Downstream text generator failed
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl From<KeyServiceError> for RedactionError {
    fn from(err: KeyServiceError) -> Self {
        match err {
            KeyServiceError::Unavailable(source) => Self::KeyServiceUnavailable(source),
            KeyServiceError::Denied { reason } => Self::KeyServiceDenied { reason },
        }
    }
}

/// Errors returned by [`MasterKeyService`](crate::traits::MasterKeyService)
/// implementations.
#[derive(Debug, Error)]
pub enum KeyServiceError {
    /// Service unreachable or failed internally
    #[error("unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Service reachable but refused the request (auth, permissions)
    #[error("denied: {reason}")]
    Denied { reason: String },
}

/// Errors returned by [`Classifier`](crate::traits::Classifier)
/// implementations.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Classifier unreachable or failed internally
    #[error("classifier unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Classifier responded with something the adapter cannot interpret
    #[error("malformed classifier response: {reason}")]
    Malformed { reason: String },
}

/// Errors returned by
/// [`FormatPreservingEncoder`](crate::traits::FormatPreservingEncoder)
/// implementations.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Encoding request failed in transit or inside the primitive
    #[error("encoding request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Primitive rejected the input (bad alphabet, bad key reference)
    #[error("encoding rejected: {reason}")]
    Rejected { reason: String },
}

/// Errors returned by [`TextGenerator`](crate::traits::TextGenerator)
/// implementations.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Generator unreachable or failed internally
    #[error("generator unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Generator returned a response with no usable text
    #[error("empty generation response")]
    EmptyResponse,
}

/// Startup-time policy validation errors.
///
/// Raised once when the policy engine is constructed, never at
/// request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyConfigError {
    /// The same category is claimed by more than one rule
    #[error("category {category} is claimed by more than one rule")]
    DuplicateCategory { category: String },

    /// A tokenize rule carries an unusable alphabet
    #[error("tokenize rule for {category} has an invalid alphabet: {reason}")]
    InvalidAlphabet { category: String, reason: String },

    /// A tokenize rule is missing its context tag
    #[error("tokenize rule for {category} has an empty context tag")]
    EmptyContext { category: String },
}

/// Result type alias for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;
