//! Pipeline orchestration: redact → generate → restore.
//!
//! One `Pipeline` is built at process start from injected collaborator
//! handles plus read-only policy and dictionary configuration, then
//! shared across requests. Everything produced per request (wrapped
//! key, pseudonym table, transformed text) is scoped to that request
//! and dropped with it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::detect::DetectorAdapter;
use crate::error::Result;
use crate::keys::KeyEnvelopeManager;
use crate::policy::PolicyEngine;
use crate::resolver::resolve_pseudonyms;
use crate::restore::restore_text;
use crate::traits::{Classifier, FormatPreservingEncoder, MasterKeyService, TextGenerator};
use crate::transform::apply_transformations;
use crate::types::{CustomDictionary, PseudonymTable, RedactionConfig, TransformedDocument};

/// Result of one end-to-end summarize request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// Generator output with dictionary tokens restored to literals
    pub summary: String,

    /// The de-identified text that was actually sent to the generator,
    /// surfaced so callers can show what left the trust boundary
    pub redacted_text: String,
}

/// The redaction pipeline: stateless per request, collaborators shared.
pub struct Pipeline {
    keys: KeyEnvelopeManager,
    detector: DetectorAdapter,
    encoder: Arc<dyn FormatPreservingEncoder>,
    generator: Arc<dyn TextGenerator>,
    policy: Arc<PolicyEngine>,
    dictionary: Arc<CustomDictionary>,
    config: RedactionConfig,
}

impl Pipeline {
    /// Assemble the pipeline from collaborator handles and validated
    /// configuration. Construct once at process start.
    pub fn new(
        key_service: Arc<dyn MasterKeyService>,
        classifier: Arc<dyn Classifier>,
        encoder: Arc<dyn FormatPreservingEncoder>,
        generator: Arc<dyn TextGenerator>,
        policy: Arc<PolicyEngine>,
        dictionary: Arc<CustomDictionary>,
        config: RedactionConfig,
    ) -> Self {
        Self {
            keys: KeyEnvelopeManager::new(key_service, config.master_key_id.clone()),
            detector: DetectorAdapter::new(classifier),
            encoder,
            generator,
            policy,
            dictionary,
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Redact and tokenize one document.
    ///
    /// Key wrapping and detection run concurrently; both must succeed
    /// before any text is transformed, and the pseudonym table is built
    /// under the same wrapped key as the document itself. Failure at
    /// any stage aborts the request with nothing partial returned.
    pub async fn redact(&self, text: &str) -> Result<TransformedDocument> {
        let (key, spans) = tokio::join!(
            self.keys.create_wrapped_key(),
            self.detector
                .detect(text, self.policy.categories(), &self.dictionary),
        );
        let key = key?;
        let spans = spans?;

        let table = resolve_pseudonyms(&self.dictionary, &self.policy, &key, self.encoder.as_ref())
            .await?;
        let transformed =
            apply_transformations(text, &spans, &self.policy, &key, self.encoder.as_ref()).await?;

        info!(
            spans = spans.len(),
            table_entries = table.len(),
            "document redacted"
        );
        Ok(TransformedDocument {
            text: transformed,
            table,
        })
    }

    /// Restore dictionary literals in generator output.
    pub fn restore(&self, generated: &str, table: &PseudonymTable) -> String {
        restore_text(generated, table)
    }

    /// End to end: redact, summarize through the generator, restore.
    pub async fn summarize(&self, text: &str) -> Result<SummaryOutput> {
        let document = self.redact(text).await?;

        let prompt = summarize_prompt(&document.text, self.config.summary_word_limit);
        debug!(prompt_len = prompt.len(), "sending prompt to generator");
        let raw = self
            .generator
            .generate(&prompt, self.config.max_output_tokens, self.config.temperature)
            .await?;

        let summary = restore_text(&raw, &document.table);
        Ok(SummaryOutput {
            summary,
            redacted_text: document.text,
        })
    }
}

/// Prompt shape for the summarization call.
fn summarize_prompt(text: &str, word_limit: usize) -> String {
    format!("Summarize this document in {} words:\n\n{}", word_limit, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_shape() {
        let prompt = summarize_prompt("BODY", 200);
        assert_eq!(prompt, "Summarize this document in 200 words:\n\nBODY");
    }
}
