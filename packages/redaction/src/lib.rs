//! Reversible Redaction and Tokenization Core
//!
//! Redacts and reversibly tokenizes sensitive spans of free text
//! before the text is sent to a third-party text-generation service,
//! then restores the original values in the generated output.
//!
//! # Design
//!
//! - Detection is delegated to an external classifier; this crate only
//!   marshals spans.
//! - Tokenization is a deterministic, format-preserving encoding keyed
//!   by a fresh per-request data key, which is wrapped by a master key
//!   service before it leaves the key manager; the plaintext key never
//!   reaches the rest of the pipeline.
//! - Restoration is string substitution against a precomputed
//!   literal↔token table, not decryption. A token the generator altered
//!   stays tokenized; that is accepted degraded output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use redaction::{
//!     CustomDictionary, EntityCategory, Pipeline, PolicyEngine, RedactionConfig,
//!     TransformationRule,
//! };
//! use redaction::testing::{MockClassifier, MockEncoder, MockGenerator, MockKeyService};
//!
//! let policy = Arc::new(PolicyEngine::new(vec![
//!     TransformationRule::redact([EntityCategory::Email, EntityCategory::PhoneNumber]),
//!     TransformationRule::tokenize(
//!         [EntityCategory::Custom("COUNTERPARTY_NAME".into())],
//!         "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 .,&'-()",
//!         "ctx1",
//!     ),
//! ])?);
//! let dictionary = Arc::new(CustomDictionary::new("COUNTERPARTY_NAME", "v1")
//!     .with_literal("Citibank"));
//!
//! let pipeline = Pipeline::new(
//!     Arc::new(MockKeyService::new()),
//!     Arc::new(MockClassifier::new()),
//!     Arc::new(MockEncoder::new()),
//!     Arc::new(MockGenerator::new()),
//!     policy,
//!     dictionary,
//!     RedactionConfig::new("projects/p/locations/l/keyRings/r/cryptoKeys/k"),
//! );
//!
//! let output = pipeline.summarize(&document_text).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (key service, classifier,
//!   encoder, generator)
//! - [`types`] - Spans, policy rules, keys, tables, configuration
//! - [`policy`] - Category → transformation resolution
//! - [`keys`] - Per-request envelope key management
//! - [`detect`] / [`transform`] / [`resolver`] / [`restore`] - Pipeline stages
//! - [`pipeline`] - Orchestration
//! - [`testing`] - Mock collaborators for testing
//! - [`gcp`] - GCP-backed collaborator implementations (feature `gcp`)

pub mod detect;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod restore;
pub mod testing;
pub mod traits;
pub mod transform;
pub mod types;

#[cfg(feature = "gcp")]
pub mod gcp;

// Re-export core types at crate root
pub use error::{
    DetectionError, EncodeError, GenerationError, KeyServiceError, PolicyConfigError,
    RedactionError, Result,
};
pub use traits::{Classifier, Finding, FormatPreservingEncoder, MasterKeyService, TextGenerator};
pub use types::{
    CustomDictionary, EntityCategory, PseudonymTable, RedactionConfig, SensitiveSpan,
    TransformationKind, TransformationRule, TransformedDocument, WrappedKey,
};

// Re-export pipeline stages and orchestration
pub use detect::DetectorAdapter;
pub use keys::{KeyEnvelopeManager, DATA_KEY_LEN};
pub use pipeline::{Pipeline, SummaryOutput};
pub use policy::PolicyEngine;
pub use resolver::resolve_pseudonyms;
pub use restore::restore_text;
pub use transform::apply_transformations;

#[cfg(feature = "gcp")]
pub use gcp::{DlpClassifier, DlpEncoder, GeminiGenerator, KmsKeyService};
