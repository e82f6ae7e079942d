//! Downstream text generator trait.

use async_trait::async_trait;

use crate::error::GenerationError;

/// External text-generation service.
///
/// The core only hands it a prompt built from the transformed document
/// and reads plain text back; no structured protocol. The generator
/// never sees raw sensitive values.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError>;
}
