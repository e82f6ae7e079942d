//! Testing utilities including mock collaborators.
//!
//! These are useful for testing applications that use the redaction
//! library without a key service, classifier, encoding primitive, or
//! generator on the network. The mock encoder is deterministic the way
//! the real primitive is, but it is a test double, not cryptography.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::{DetectionError, EncodeError, GenerationError, KeyServiceError};
use crate::traits::{Classifier, Finding, FormatPreservingEncoder, MasterKeyService, TextGenerator};
use crate::types::{CustomDictionary, EntityCategory, WrappedKey};

fn mock_io_error(message: &'static str) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        message,
    ))
}

/// Record of a call made to [`MockKeyService`].
#[derive(Debug, Clone)]
pub enum MockKeyServiceCall {
    Wrap {
        plaintext_len: usize,
        master_key_id: String,
    },
}

/// A mock master key service.
///
/// Wraps by hashing, which is one-way: the mock never needs to unwrap
/// because the mock encoder keys itself off the wrapped bytes.
#[derive(Default)]
pub struct MockKeyService {
    fail_unavailable: bool,
    deny_reason: Option<String>,
    calls: Arc<RwLock<Vec<MockKeyServiceCall>>>,
}

impl MockKeyService {
    /// Create a mock that wraps successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every wrap call fail as unavailable.
    pub fn fail_unavailable(mut self) -> Self {
        self.fail_unavailable = true;
        self
    }

    /// Make every wrap call fail as denied.
    pub fn fail_denied(mut self, reason: impl Into<String>) -> Self {
        self.deny_reason = Some(reason.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockKeyServiceCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl MasterKeyService for MockKeyService {
    async fn wrap_key(
        &self,
        plaintext: &[u8],
        master_key_id: &str,
    ) -> Result<Vec<u8>, KeyServiceError> {
        self.calls.write().unwrap().push(MockKeyServiceCall::Wrap {
            plaintext_len: plaintext.len(),
            master_key_id: master_key_id.to_string(),
        });

        if self.fail_unavailable {
            return Err(KeyServiceError::Unavailable(mock_io_error(
                "mock key service unreachable",
            )));
        }
        if let Some(reason) = &self.deny_reason {
            return Err(KeyServiceError::Denied {
                reason: reason.clone(),
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(master_key_id.as_bytes());
        hasher.update(plaintext);
        Ok(hasher.finalize().to_vec())
    }
}

/// Record of a call made to [`MockClassifier`].
#[derive(Debug, Clone)]
pub enum MockClassifierCall {
    Inspect {
        text_len: usize,
        category_count: usize,
        dictionary: String,
    },
}

/// A mock classifier.
///
/// Returns predefined findings per input text; on top of those it
/// always reports every occurrence of the dictionary's literals, so
/// dictionary-driven tests need no per-text setup.
#[derive(Default)]
pub struct MockClassifier {
    findings: Arc<RwLock<HashMap<String, Vec<Finding>>>>,
    fail_unavailable: bool,
    calls: Arc<RwLock<Vec<MockClassifierCall>>>,
}

impl MockClassifier {
    /// Create a mock classifier with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined finding for an input text.
    pub fn with_finding(self, text: impl Into<String>, finding: Finding) -> Self {
        self.findings
            .write()
            .unwrap()
            .entry(text.into())
            .or_default()
            .push(finding);
        self
    }

    /// Make every inspect call fail.
    pub fn fail_unavailable(mut self) -> Self {
        self.fail_unavailable = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockClassifierCall> {
        self.calls.read().unwrap().clone()
    }

    fn dictionary_findings(&self, text: &str, dictionary: &CustomDictionary) -> Vec<Finding> {
        let mut findings = Vec::new();
        for literal in &dictionary.literals {
            if literal.is_empty() {
                continue;
            }
            let mut from = 0;
            while let Some(pos) = text[from..].find(literal.as_str()) {
                let start = from + pos;
                let end = start + literal.len();
                findings.push(Finding::new(&dictionary.name, literal, start, end));
                from = end;
            }
        }
        findings
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn inspect(
        &self,
        text: &str,
        categories: &[EntityCategory],
        dictionary: &CustomDictionary,
    ) -> Result<Vec<Finding>, DetectionError> {
        self.calls.write().unwrap().push(MockClassifierCall::Inspect {
            text_len: text.len(),
            category_count: categories.len(),
            dictionary: dictionary.name.clone(),
        });

        if self.fail_unavailable {
            return Err(DetectionError::Unavailable(mock_io_error(
                "mock classifier unreachable",
            )));
        }

        let mut findings = self
            .findings
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_default();

        if categories.iter().any(|c| *c == dictionary.category()) {
            findings.extend(self.dictionary_findings(text, dictionary));
        }

        Ok(findings)
    }
}

/// Record of a call made to [`MockEncoder`].
#[derive(Debug, Clone)]
pub struct MockEncoderCall {
    pub text: String,
    pub context: String,
    pub alphabet: String,
    pub master_key_id: String,
}

/// A mock format-preserving encoder.
///
/// Deterministic for fixed (text, wrapped key, context, alphabet) and
/// emits tokens of the same character length drawn from the alphabet,
/// which are the properties the pipeline relies on. No real
/// cryptography sits behind them.
#[derive(Default)]
pub struct MockEncoder {
    fail_requests: bool,
    calls: Arc<RwLock<Vec<MockEncoderCall>>>,
}

impl MockEncoder {
    /// Create a mock encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every encode call fail.
    pub fn fail_requests(mut self) -> Self {
        self.fail_requests = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockEncoderCall> {
        self.calls.read().unwrap().clone()
    }

    fn deterministic_token(text: &str, key: &WrappedKey, context: &str, alphabet: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&key.ciphertext);
        hasher.update(context.as_bytes());
        hasher.update(alphabet.as_bytes());
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        let chars: Vec<char> = alphabet.chars().collect();
        text.chars()
            .enumerate()
            .map(|(i, _)| {
                let byte = hash[i % hash.len()] as usize;
                chars[(byte + i) % chars.len()]
            })
            .collect()
    }
}

#[async_trait]
impl FormatPreservingEncoder for MockEncoder {
    async fn encode(
        &self,
        text: &str,
        key: &WrappedKey,
        context: &str,
        alphabet: &str,
    ) -> Result<String, EncodeError> {
        self.calls.write().unwrap().push(MockEncoderCall {
            text: text.to_string(),
            context: context.to_string(),
            alphabet: alphabet.to_string(),
            master_key_id: key.master_key_id.clone(),
        });

        if self.fail_requests {
            return Err(EncodeError::Request(mock_io_error(
                "mock encoding primitive unreachable",
            )));
        }
        if alphabet.is_empty() {
            return Err(EncodeError::Rejected {
                reason: "empty alphabet".to_string(),
            });
        }

        Ok(Self::deterministic_token(text, key, context, alphabet))
    }
}

/// Record of a call made to [`MockGenerator`].
#[derive(Debug, Clone)]
pub enum MockGeneratorCall {
    Generate {
        prompt: String,
        max_output_tokens: u32,
        temperature: f32,
    },
}

/// A mock text generator.
///
/// Returns a predefined response when one matches the prompt, otherwise
/// echoes the prompt back, acting as an "ideal generator" that
/// reproduces every token verbatim.
#[derive(Default)]
pub struct MockGenerator {
    responses: Arc<RwLock<Vec<(String, String)>>>,
    fail_requests: bool,
    calls: Arc<RwLock<Vec<MockGeneratorCall>>>,
}

impl MockGenerator {
    /// Create a mock generator with echo behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` to any prompt containing `fragment`.
    pub fn with_response(self, fragment: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((fragment.into(), response.into()));
        self
    }

    /// Make every generate call fail.
    pub fn fail_requests(mut self) -> Self {
        self.fail_requests = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockGeneratorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        self.calls.write().unwrap().push(MockGeneratorCall::Generate {
            prompt: prompt.to_string(),
            max_output_tokens,
            temperature,
        });

        if self.fail_requests {
            return Err(GenerationError::Unavailable(mock_io_error(
                "mock generator unreachable",
            )));
        }

        let responses = self.responses.read().unwrap();
        if let Some((_, response)) = responses.iter().find(|(fragment, _)| prompt.contains(fragment))
        {
            return Ok(response.clone());
        }
        Ok(prompt.to_string())
    }
}
