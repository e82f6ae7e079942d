//! The wrapped per-request data key.

use std::fmt;

/// A data key in its encrypted-at-rest form, as returned by the master
/// key service.
///
/// Generated fresh per request; the unwrapped plaintext key never
/// appears in this type. The ciphertext is safe to transmit to the
/// encoding primitive (which unwraps it itself), but `Debug` still
/// shows only its length so key material stays out of logs entirely.
#[derive(Clone, PartialEq, Eq)]
pub struct WrappedKey {
    /// Wrapped key bytes
    pub ciphertext: Vec<u8>,

    /// Resource name of the master key that wrapped it
    pub master_key_id: String,
}

impl WrappedKey {
    /// Create a wrapped key from service output.
    pub fn new(ciphertext: Vec<u8>, master_key_id: impl Into<String>) -> Self {
        Self {
            ciphertext,
            master_key_id: master_key_id.into(),
        }
    }
}

impl fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedKey")
            .field("ciphertext", &format!("[{} bytes]", self.ciphertext.len()))
            .field("master_key_id", &self.master_key_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_ciphertext() {
        let key = WrappedKey::new(vec![0xDE, 0xAD, 0xBE, 0xEF], "projects/p/keys/k");
        let debug = format!("{:?}", key);
        assert!(debug.contains("[4 bytes]"));
        assert!(!debug.contains("222")); // 0xDE as decimal
        assert!(debug.contains("projects/p/keys/k"));
    }
}
