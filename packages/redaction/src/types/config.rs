//! Configuration types for the redaction pipeline.

use serde::{Deserialize, Serialize};

use crate::types::span::EntityCategory;

/// A versioned dictionary of known literal values defining one custom
/// category.
///
/// Dictionaries are configuration data: loaded once at process start,
/// shared read-only across requests, swappable in tests without
/// touching core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDictionary {
    /// Classifier-facing category name (e.g. `COUNTERPARTY_NAME`)
    pub name: String,

    /// Version tag of this word list
    pub version: String,

    /// Literal values that define membership
    pub literals: Vec<String>,
}

impl CustomDictionary {
    /// Create an empty dictionary for a category.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            literals: Vec::new(),
        }
    }

    /// Add one literal.
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literals.push(literal.into());
        self
    }

    /// Add multiple literals.
    pub fn with_literals(mut self, literals: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.literals.extend(literals.into_iter().map(|l| l.into()));
        self
    }

    /// The category this dictionary defines.
    pub fn category(&self) -> EntityCategory {
        EntityCategory::Custom(self.name.clone())
    }
}

/// Configuration for the redaction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Resource name of the master key used to wrap per-request data
    /// keys. Supplied by deployment configuration, never hardcoded.
    pub master_key_id: String,

    /// Word limit stated in the summarization prompt.
    ///
    /// Default: 200.
    pub summary_word_limit: usize,

    /// Token cap passed to the generator.
    ///
    /// Default: 200.
    pub max_output_tokens: u32,

    /// Sampling temperature passed to the generator.
    ///
    /// Default: 0.2 (factual summarization).
    pub temperature: f32,
}

impl RedactionConfig {
    /// Create a config with default generation parameters.
    pub fn new(master_key_id: impl Into<String>) -> Self {
        Self {
            master_key_id: master_key_id.into(),
            summary_word_limit: 200,
            max_output_tokens: 200,
            temperature: 0.2,
        }
    }

    /// Set the summary word limit.
    pub fn with_summary_word_limit(mut self, limit: usize) -> Self {
        self.summary_word_limit = limit;
        self
    }

    /// Set the generator token cap.
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Set the generator temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
