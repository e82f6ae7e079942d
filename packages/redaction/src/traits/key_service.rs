//! Master key service trait for envelope encryption.

use async_trait::async_trait;

use crate::error::KeyServiceError;

/// External master key service.
///
/// Wraps short-lived data keys under a long-lived master key so the
/// data key can travel to the encoding primitive without the master
/// key ever leaving the service. The core calls `wrap_key` only; the
/// matching unwrap happens inside the encoding primitive.
#[async_trait]
pub trait MasterKeyService: Send + Sync {
    /// Wrap a plaintext data key under the named master key, returning
    /// the ciphertext form.
    ///
    /// Failure is fatal to the request that asked for the key: an
    /// unwrapped key must never be transmitted onward.
    async fn wrap_key(
        &self,
        plaintext: &[u8],
        master_key_id: &str,
    ) -> Result<Vec<u8>, KeyServiceError>;
}
