//! Wire types for the Cloud DLP v2 REST API.
//!
//! Only the fields the redaction pipeline touches are modeled. Int64
//! fields (byte offsets) arrive as JSON strings per the API's proto3
//! JSON mapping and are kept as strings with parsing accessors.

use serde::{Deserialize, Serialize};

/// A piece of content to inspect or de-identify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub value: String,
}

impl ContentItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A named information type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoType {
    pub name: String,
}

impl InfoType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Literal word list backing a custom info type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordList {
    pub words: Vec<String>,
}

/// Dictionary matcher for a custom info type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub word_list: WordList,
}

/// A caller-defined info type matched by dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomInfoType {
    pub info_type: InfoType,
    pub dictionary: Dictionary,
}

impl CustomInfoType {
    /// Build a dictionary-backed custom info type.
    pub fn word_list(
        name: impl Into<String>,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            info_type: InfoType::new(name),
            dictionary: Dictionary {
                word_list: WordList {
                    words: words.into_iter().map(|w| w.into()).collect(),
                },
            },
        }
    }
}

/// What to look for during inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_info_types: Vec<CustomInfoType>,

    #[serde(default)]
    pub include_quote: bool,
}

/// Request body for `content:inspect`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectRequest {
    pub item: ContentItem,
    pub inspect_config: InspectConfig,
}

/// A half-open byte range; offsets are int64-as-string on the wire and
/// omitted when zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ByteRange {
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,
}

impl ByteRange {
    /// Start offset, defaulting to 0 when the field was omitted.
    pub fn start_offset(&self) -> Option<usize> {
        match &self.start {
            None => Some(0),
            Some(s) => s.parse().ok(),
        }
    }

    /// End offset; `None` when absent or unparseable.
    pub fn end_offset(&self) -> Option<usize> {
        self.end.as_ref()?.parse().ok()
    }
}

/// Location of one finding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingLocation {
    #[serde(default)]
    pub byte_range: Option<ByteRange>,
}

/// One match reported by inspection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlpFinding {
    #[serde(default)]
    pub quote: Option<String>,

    #[serde(default)]
    pub info_type: Option<InfoType>,

    #[serde(default)]
    pub location: Option<FindingLocation>,
}

/// Inspection result: the findings list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectResult {
    #[serde(default)]
    pub findings: Vec<DlpFinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InspectResponse {
    #[serde(default)]
    pub result: InspectResult,
}

/// Reference to a data key wrapped by Cloud KMS. The DLP service
/// unwraps it internally; the plaintext key never transits this API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KmsWrappedCryptoKey {
    /// Base64 of the wrapped key bytes
    pub wrapped_key: String,

    /// Full resource name of the KMS crypto key that wrapped it
    pub crypto_key_name: String,
}

/// Crypto key choice for crypto-based transformations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoKey {
    pub kms_wrapped: KmsWrappedCryptoKey,
}

/// A field reference used as a tweak context.
#[derive(Debug, Clone, Serialize)]
pub struct FieldId {
    pub name: String,
}

/// Deterministic format-preserving encryption (FFX FPE) configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoReplaceFfxFpeConfig {
    pub crypto_key: CryptoKey,

    pub custom_alphabet: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<FieldId>,
}

/// The single primitive transformation the pipeline uses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveTransformation {
    pub crypto_replace_ffx_fpe_config: CryptoReplaceFfxFpeConfig,
}

/// Binds a transformation to the info types it applies to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,

    pub primitive_transformation: PrimitiveTransformation,
}

/// Transformation set for `content:deidentify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformations {
    pub transformations: Vec<InfoTypeTransformation>,
}

/// De-identification configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyConfig {
    pub info_type_transformations: InfoTypeTransformations,
}

/// Request body for `content:deidentify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyRequest {
    pub item: ContentItem,
    pub deidentify_config: DeidentifyConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeidentifyResponse {
    pub item: ContentItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_request_wire_shape() {
        let request = InspectRequest {
            item: ContentItem::new("text"),
            inspect_config: InspectConfig {
                info_types: vec![InfoType::new("EMAIL_ADDRESS")],
                custom_info_types: vec![CustomInfoType::word_list(
                    "COUNTERPARTY_NAME",
                    ["Citibank"],
                )],
                include_quote: true,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["item"]["value"], "text");
        assert_eq!(json["inspectConfig"]["infoTypes"][0]["name"], "EMAIL_ADDRESS");
        assert_eq!(
            json["inspectConfig"]["customInfoTypes"][0]["dictionary"]["wordList"]["words"][0],
            "Citibank"
        );
        assert_eq!(json["inspectConfig"]["includeQuote"], true);
    }

    #[test]
    fn test_byte_range_offsets() {
        let range: ByteRange = serde_json::from_str(r#"{"start":"26","end":"34"}"#).unwrap();
        assert_eq!(range.start_offset(), Some(26));
        assert_eq!(range.end_offset(), Some(34));

        // start omitted means zero on this API
        let range: ByteRange = serde_json::from_str(r#"{"end":"8"}"#).unwrap();
        assert_eq!(range.start_offset(), Some(0));
        assert_eq!(range.end_offset(), Some(8));
    }

    #[test]
    fn test_finding_parses_with_missing_fields() {
        let finding: DlpFinding = serde_json::from_str(r#"{"infoType":{"name":"PERSON_NAME"}}"#).unwrap();
        assert_eq!(finding.info_type.unwrap().name, "PERSON_NAME");
        assert!(finding.quote.is_none());
        assert!(finding.location.is_none());
    }

    #[test]
    fn test_fpe_config_wire_shape() {
        let config = CryptoReplaceFfxFpeConfig {
            crypto_key: CryptoKey {
                kms_wrapped: KmsWrappedCryptoKey {
                    wrapped_key: "AAAA".to_string(),
                    crypto_key_name: "projects/p/keys/k".to_string(),
                },
            },
            custom_alphabet: "ABC".to_string(),
            context: Some(FieldId {
                name: "ctx1".to_string(),
            }),
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["cryptoKey"]["kmsWrapped"]["wrappedKey"], "AAAA");
        assert_eq!(json["cryptoKey"]["kmsWrapped"]["cryptoKeyName"], "projects/p/keys/k");
        assert_eq!(json["customAlphabet"], "ABC");
        assert_eq!(json["context"]["name"], "ctx1");
    }
}
