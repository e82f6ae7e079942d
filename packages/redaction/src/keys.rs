//! Key envelope manager: per-request data keys, wrapped at birth.
//!
//! Each request gets an independent 32-byte data key so a key
//! compromise is scoped to one request's tokenization. The plaintext
//! key lives inside a `secrecy::SecretBox` for the duration of the one
//! wrap call and is zeroized on drop, on every exit path.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretBox};
use tracing::debug;

use crate::error::Result;
use crate::traits::MasterKeyService;
use crate::types::WrappedKey;

/// Length of the per-request data key in bytes.
pub const DATA_KEY_LEN: usize = 32;

/// Creates fresh wrapped data keys through the master key service.
///
/// Holds no state between calls. The master key reference comes from
/// configuration, not from this crate.
pub struct KeyEnvelopeManager {
    service: Arc<dyn MasterKeyService>,
    master_key_id: String,
}

impl KeyEnvelopeManager {
    /// Create a manager over an injected key service handle.
    pub fn new(service: Arc<dyn MasterKeyService>, master_key_id: impl Into<String>) -> Self {
        Self {
            service,
            master_key_id: master_key_id.into(),
        }
    }

    /// The configured master key resource name.
    pub fn master_key_id(&self) -> &str {
        &self.master_key_id
    }

    /// Generate a cryptographically random data key and wrap it.
    ///
    /// Wrap failure is fatal to the request; there is no fallback to an
    /// unwrapped key.
    pub async fn create_wrapped_key(&self) -> Result<WrappedKey> {
        let plaintext = SecretBox::new(Box::new(generate_data_key()));

        let ciphertext = self
            .service
            .wrap_key(plaintext.expose_secret(), &self.master_key_id)
            .await?;

        debug!(
            master_key_id = %self.master_key_id,
            ciphertext_len = ciphertext.len(),
            "wrapped fresh data key"
        );

        Ok(WrappedKey::new(ciphertext, self.master_key_id.clone()))
    }
}

fn generate_data_key() -> [u8; DATA_KEY_LEN] {
    let mut key = [0u8; DATA_KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RedactionError;
    use crate::testing::{MockKeyService, MockKeyServiceCall};

    #[tokio::test]
    async fn test_create_wrapped_key() {
        let service = Arc::new(MockKeyService::new());
        let manager = KeyEnvelopeManager::new(service.clone(), "projects/p/keys/k");

        let key = manager.create_wrapped_key().await.unwrap();
        assert_eq!(key.master_key_id, "projects/p/keys/k");
        assert!(!key.ciphertext.is_empty());

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        let MockKeyServiceCall::Wrap {
            plaintext_len,
            master_key_id,
        } = &calls[0];
        assert_eq!(*plaintext_len, DATA_KEY_LEN);
        assert_eq!(master_key_id, "projects/p/keys/k");
    }

    #[tokio::test]
    async fn test_keys_are_independent_per_call() {
        let service = Arc::new(MockKeyService::new());
        let manager = KeyEnvelopeManager::new(service, "projects/p/keys/k");

        let a = manager.create_wrapped_key().await.unwrap();
        let b = manager.create_wrapped_key().await.unwrap();
        // Fresh random key material every call, so wraps differ.
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[tokio::test]
    async fn test_wrap_unavailable_propagates() {
        let service = Arc::new(MockKeyService::new().fail_unavailable());
        let manager = KeyEnvelopeManager::new(service, "projects/p/keys/k");

        let err = manager.create_wrapped_key().await.unwrap_err();
        assert!(matches!(err, RedactionError::KeyServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_wrap_denied_propagates() {
        let service = Arc::new(MockKeyService::new().fail_denied("caller lacks encrypt permission"));
        let manager = KeyEnvelopeManager::new(service, "projects/p/keys/k");

        let err = manager.create_wrapped_key().await.unwrap_err();
        assert!(matches!(err, RedactionError::KeyServiceDenied { .. }));
    }
}
