//! GCP-backed collaborator implementations.
//!
//! Adapts the pure REST clients (`kms-client`, `dlp-client`,
//! `gemini-client`) to the collaborator traits. Each adapter owns one
//! client, translates between domain types and wire types, and maps
//! client errors onto the collaborator error taxonomy. No pipeline
//! logic lives here.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, warn};

use dlp_client::{
    ContentItem, CryptoKey, CryptoReplaceFfxFpeConfig, CustomInfoType, DeidentifyConfig,
    DeidentifyRequest, DlpClient, DlpError, FieldId, InfoType, InfoTypeTransformation,
    InfoTypeTransformations, InspectConfig, InspectRequest, KmsWrappedCryptoKey,
    PrimitiveTransformation,
};
use gemini_client::{GeminiClient, GenerationConfig};
use kms_client::{KmsClient, KmsError};

use crate::error::{DetectionError, EncodeError, GenerationError, KeyServiceError};
use crate::traits::{Classifier, Finding, FormatPreservingEncoder, MasterKeyService, TextGenerator};
use crate::types::{CustomDictionary, EntityCategory, WrappedKey};

/// Surrogate info type name used when de-identifying a single literal.
///
/// `content:deidentify` applies transformations by info type, so the
/// exact text to encode is submitted as a one-word dictionary bound to
/// this name.
const SURROGATE_INFO_TYPE: &str = "TOKENIZE_TARGET";

/// [`MasterKeyService`] backed by Cloud KMS `:encrypt`.
pub struct KmsKeyService {
    client: KmsClient,
}

impl KmsKeyService {
    pub fn new(client: KmsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MasterKeyService for KmsKeyService {
    async fn wrap_key(
        &self,
        plaintext: &[u8],
        master_key_id: &str,
    ) -> Result<Vec<u8>, KeyServiceError> {
        self.client
            .encrypt(master_key_id, plaintext)
            .await
            .map_err(|e| match e {
                KmsError::Api { status, message } if status == 401 || status == 403 => {
                    KeyServiceError::Denied { reason: message }
                }
                other => KeyServiceError::Unavailable(Box::new(other)),
            })
    }
}

/// [`Classifier`] backed by DLP `content:inspect`.
pub struct DlpClassifier {
    client: DlpClient,
}

impl DlpClassifier {
    pub fn new(client: DlpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Classifier for DlpClassifier {
    async fn inspect(
        &self,
        text: &str,
        categories: &[EntityCategory],
        dictionary: &CustomDictionary,
    ) -> Result<Vec<Finding>, DetectionError> {
        let info_types: Vec<InfoType> = categories
            .iter()
            .filter(|c| !c.is_custom())
            .map(|c| InfoType::new(c.name()))
            .collect();

        let custom_info_types = if categories.contains(&dictionary.category()) {
            vec![CustomInfoType::word_list(
                &dictionary.name,
                dictionary.literals.iter().cloned(),
            )]
        } else {
            Vec::new()
        };

        let request = InspectRequest {
            item: ContentItem::new(text),
            inspect_config: InspectConfig {
                info_types,
                custom_info_types,
                include_quote: true,
            },
        };

        let result = self
            .client
            .inspect_content(request)
            .await
            .map_err(|e| DetectionError::Unavailable(Box::new(e)))?;

        let mut findings = Vec::with_capacity(result.findings.len());
        for raw in result.findings {
            let Some(info_type) = raw.info_type else {
                warn!("DLP finding without an info type, dropping");
                continue;
            };
            let Some(range) = raw.location.and_then(|l| l.byte_range) else {
                warn!(category = %info_type.name, "DLP finding without a byte range, dropping");
                continue;
            };
            let (Some(start), Some(end)) = (range.start_offset(), range.end_offset()) else {
                return Err(DetectionError::Malformed {
                    reason: format!("unparseable byte range for {}", info_type.name),
                });
            };
            findings.push(Finding::new(
                info_type.name,
                raw.quote.unwrap_or_default(),
                start,
                end,
            ));
        }

        debug!(count = findings.len(), "DLP inspection findings mapped");
        Ok(findings)
    }
}

/// [`FormatPreservingEncoder`] backed by DLP `content:deidentify` with
/// `CryptoReplaceFfxFpeConfig` and a KMS-wrapped key.
pub struct DlpEncoder {
    client: DlpClient,
}

impl DlpEncoder {
    pub fn new(client: DlpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FormatPreservingEncoder for DlpEncoder {
    async fn encode(
        &self,
        text: &str,
        key: &WrappedKey,
        context: &str,
        alphabet: &str,
    ) -> Result<String, EncodeError> {
        let request = DeidentifyRequest {
            item: ContentItem::new(text),
            deidentify_config: DeidentifyConfig {
                info_type_transformations: InfoTypeTransformations {
                    transformations: vec![InfoTypeTransformation {
                        info_types: vec![InfoType::new(SURROGATE_INFO_TYPE)],
                        primitive_transformation: PrimitiveTransformation {
                            crypto_replace_ffx_fpe_config: CryptoReplaceFfxFpeConfig {
                                crypto_key: CryptoKey {
                                    kms_wrapped: KmsWrappedCryptoKey {
                                        wrapped_key: BASE64.encode(&key.ciphertext),
                                        crypto_key_name: key.master_key_id.clone(),
                                    },
                                },
                                custom_alphabet: alphabet.to_string(),
                                context: Some(FieldId {
                                    name: context.to_string(),
                                }),
                            },
                        },
                    }],
                },
            },
            // Match the whole submitted value via a one-word dictionary
            // bound to the surrogate info type.
            inspect_config: Some(InspectConfig {
                info_types: Vec::new(),
                custom_info_types: vec![CustomInfoType::word_list(SURROGATE_INFO_TYPE, [text])],
                include_quote: false,
            }),
        };

        let item = self
            .client
            .deidentify_content(request)
            .await
            .map_err(|e| match e {
                DlpError::Api { status: 400, message } => EncodeError::Rejected { reason: message },
                other => EncodeError::Request(Box::new(other)),
            })?;

        Ok(item.value)
    }
}

/// [`TextGenerator`] backed by Gemini `generateContent`.
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let config = GenerationConfig {
            max_output_tokens: Some(max_output_tokens),
            temperature: Some(temperature),
        };

        match self.client.generate_text(prompt, config).await {
            Ok(text) if text.trim().is_empty() => Err(GenerationError::EmptyResponse),
            Ok(text) => Ok(text),
            Err(gemini_client::GeminiError::Parse(_)) => Err(GenerationError::EmptyResponse),
            Err(other) => Err(GenerationError::Unavailable(Box::new(other))),
        }
    }
}
