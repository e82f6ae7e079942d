//! Format-preserving encoding primitive trait.

use async_trait::async_trait;

use crate::error::EncodeError;
use crate::types::WrappedKey;

/// External deterministic format-preserving encoding primitive.
///
/// The primitive receives the *wrapped* key plus the master key
/// reference carried inside it; unwrapping and encoding both happen on
/// the remote side, so the plaintext key is never handled by this
/// crate.
#[async_trait]
pub trait FormatPreservingEncoder: Send + Sync {
    /// Encode `text` under `(key, context, alphabet)`.
    ///
    /// Must be deterministic: identical inputs always produce the
    /// identical token. The transform engine and the pseudonym resolver
    /// both depend on this to agree on tokens.
    async fn encode(
        &self,
        text: &str,
        key: &WrappedKey,
        context: &str,
        alphabet: &str,
    ) -> Result<String, EncodeError>;
}
