//! Transform engine: rewrite a document according to the policy.
//!
//! Replacement is all-or-nothing per document: the output buffer is
//! built left-to-right from sorted, non-overlapping spans against the
//! *original* offsets, so no replacement ever shifts under another.
//! Any encoding failure aborts the whole document.

use tracing::warn;

use crate::error::{DetectionError, RedactionError, Result};
use crate::policy::PolicyEngine;
use crate::traits::FormatPreservingEncoder;
use crate::types::{SensitiveSpan, TransformationKind, WrappedKey};

/// Apply the policy's transformation to every detected span.
///
/// Spans may arrive in any order and may contain exact duplicates
/// (several detectors reporting one match); duplicates are collapsed.
/// Distinct spans that overlap are a detector or configuration fault
/// and fail the request with `OverlappingSpans`. A span whose offsets
/// do not fit `text` fails the request the same way the detector
/// adapter would have failed it.
pub async fn apply_transformations(
    text: &str,
    spans: &[SensitiveSpan],
    policy: &PolicyEngine,
    key: &WrappedKey,
    encoder: &dyn FormatPreservingEncoder,
) -> Result<String> {
    let mut sorted: Vec<&SensitiveSpan> = spans.iter().collect();
    sorted.sort_by_key(|s| (s.start, s.end));
    sorted.dedup();

    for span in &sorted {
        let invalid = span.is_empty()
            || span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end);
        if invalid {
            return Err(DetectionError::Malformed {
                reason: format!("span {} does not fit the document", span.describe()),
            }
            .into());
        }
    }

    for pair in sorted.windows(2) {
        if pair[0].overlaps(pair[1]) {
            return Err(RedactionError::OverlappingSpans {
                first: pair[0].describe(),
                second: pair[1].describe(),
            });
        }
    }

    let mut output = String::with_capacity(text.len());
    let mut last_end = 0usize;

    for span in sorted {
        output.push_str(&text[last_end..span.start]);

        match policy.resolve(&span.category) {
            Some(TransformationKind::Redact) | None => {
                if policy.resolve(&span.category).is_none() {
                    // Unreachable when detection is driven by
                    // policy.categories(); redact rather than leak.
                    warn!(
                        category = %span.category,
                        "span category has no policy rule, redacting"
                    );
                }
                output.push('[');
                output.push_str(span.category.name());
                output.push(']');
            }
            Some(TransformationKind::Tokenize { alphabet, context }) => {
                let token = encoder.encode(&span.text, key, context, alphabet).await?;
                output.push_str(&token);
            }
        }

        last_end = span.end;
    }

    output.push_str(&text[last_end..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEncoder, MockEncoderCall};
    use crate::types::{EntityCategory, TransformationRule};

    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    fn counterparty() -> EntityCategory {
        EntityCategory::Custom("COUNTERPARTY_NAME".to_string())
    }

    fn policy() -> PolicyEngine {
        PolicyEngine::new(vec![
            TransformationRule::redact([EntityCategory::PhoneNumber]),
            TransformationRule::tokenize([counterparty()], ALPHABET, "ctx1"),
        ])
        .unwrap()
    }

    fn key() -> WrappedKey {
        WrappedKey::new(vec![7u8; 48], "projects/p/keys/k")
    }

    #[tokio::test]
    async fn test_redact_replaces_with_placeholder() {
        let text = "Call 555-0100 today.";
        let spans = vec![SensitiveSpan::new(
            EntityCategory::PhoneNumber,
            "555-0100",
            5,
            13,
        )];
        let encoder = MockEncoder::new();

        let out = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap();
        assert_eq!(out, "Call [PHONE_NUMBER] today.");
        assert!(encoder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_tokenize_uses_encoder() {
        let text = "Between Citibank and the Client.";
        let spans = vec![SensitiveSpan::new(counterparty(), "Citibank", 8, 16)];
        let encoder = MockEncoder::new();

        let out = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap();

        let calls = encoder.calls();
        assert_eq!(calls.len(), 1);
        let MockEncoderCall { text: encoded, context, .. } = &calls[0];
        assert_eq!(encoded, "Citibank");
        assert_eq!(context, "ctx1");

        // Token replaces the literal in place; surrounding text intact.
        assert!(out.starts_with("Between "));
        assert!(out.ends_with(" and the Client."));
        assert!(!out.contains("Citibank"));
    }

    #[tokio::test]
    async fn test_replacements_do_not_corrupt_adjacent_text() {
        let text = "A 555-0100 B 555-0199 C";
        let spans = vec![
            SensitiveSpan::new(EntityCategory::PhoneNumber, "555-0199", 13, 21),
            SensitiveSpan::new(EntityCategory::PhoneNumber, "555-0100", 2, 10),
        ];
        let encoder = MockEncoder::new();

        let out = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap();
        assert_eq!(out, "A [PHONE_NUMBER] B [PHONE_NUMBER] C");
    }

    #[tokio::test]
    async fn test_overlapping_spans_rejected() {
        let text = "Citibank N.A.";
        let spans = vec![
            SensitiveSpan::new(counterparty(), "Citibank", 0, 8),
            SensitiveSpan::new(EntityCategory::PersonName, "bank N.A.", 4, 13),
        ];
        let encoder = MockEncoder::new();

        let err = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap_err();
        assert!(matches!(err, RedactionError::OverlappingSpans { .. }));
        // All-or-nothing: the failed request made no encode calls
        // because overlap is checked before any replacement.
        assert!(encoder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exact_duplicate_spans_collapse() {
        let text = "Citibank here";
        let spans = vec![
            SensitiveSpan::new(counterparty(), "Citibank", 0, 8),
            SensitiveSpan::new(counterparty(), "Citibank", 0, 8),
        ];
        let encoder = MockEncoder::new();

        let out = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap();
        assert_eq!(encoder.calls().len(), 1);
        assert!(out.ends_with(" here"));
    }

    #[tokio::test]
    async fn test_encode_failure_aborts_document() {
        let text = "Citibank and 555-0100";
        let spans = vec![
            SensitiveSpan::new(counterparty(), "Citibank", 0, 8),
            SensitiveSpan::new(EntityCategory::PhoneNumber, "555-0100", 13, 21),
        ];
        let encoder = MockEncoder::new().fail_requests();

        let err = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap_err();
        assert!(matches!(err, RedactionError::TransformPrimitive(_)));
    }

    #[tokio::test]
    async fn test_span_past_end_of_text_errors_without_panicking() {
        let text = "Call 555-0100";
        let spans = vec![SensitiveSpan::new(
            EntityCategory::PhoneNumber,
            "555-0100",
            5,
            999,
        )];
        let encoder = MockEncoder::new();

        let err = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedactionError::DetectionUnavailable(DetectionError::Malformed { .. })
        ));
        assert!(encoder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unruled_category_redacts_instead_of_leaking() {
        let text = "see London today";
        let spans = vec![SensitiveSpan::new(EntityCategory::Location, "London", 4, 10)];
        let encoder = MockEncoder::new();

        let out = apply_transformations(text, &spans, &policy(), &key(), &encoder)
            .await
            .unwrap();
        assert_eq!(out, "see [LOCATION] today");
    }
}
