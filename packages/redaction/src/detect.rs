//! Detector adapter: marshal text through the external classifier.
//!
//! Thin by design, since the classifier does the real work. This adapter
//! shapes the request, validates what comes back, and surfaces service
//! failure as `DetectionUnavailable`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{DetectionError, Result};
use crate::traits::Classifier;
use crate::types::{CustomDictionary, EntityCategory, SensitiveSpan};

/// Turns raw text into located, typed sensitive spans.
pub struct DetectorAdapter {
    classifier: Arc<dyn Classifier>,
}

impl DetectorAdapter {
    /// Create an adapter over an injected classifier handle.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Detect spans of the given categories in `text`.
    ///
    /// A finding whose offsets fall outside `text` or off a char
    /// boundary means the classifier misbehaved, and the request fails
    /// with `DetectionError::Malformed`: the flagged value cannot be
    /// replaced at offsets that do not exist, and letting it through
    /// untransformed would leak it. Returned spans are sorted by start
    /// offset.
    pub async fn detect(
        &self,
        text: &str,
        categories: &[EntityCategory],
        dictionary: &CustomDictionary,
    ) -> Result<Vec<SensitiveSpan>> {
        let findings = self.classifier.inspect(text, categories, dictionary).await?;

        let mut spans = Vec::with_capacity(findings.len());
        for finding in findings {
            let invalid_bounds = finding.start >= finding.end
                || finding.end > text.len()
                || !text.is_char_boundary(finding.start)
                || !text.is_char_boundary(finding.end);
            if invalid_bounds {
                return Err(DetectionError::Malformed {
                    reason: format!(
                        "finding for {} has invalid offsets {}..{}",
                        finding.category, finding.start, finding.end
                    ),
                }
                .into());
            }

            let matched = &text[finding.start..finding.end];
            if matched != finding.quote {
                // Offsets are authoritative; the quote is advisory.
                warn!(
                    category = %finding.category,
                    start = finding.start,
                    end = finding.end,
                    "classifier quote does not match text at offsets"
                );
            }

            spans.push(SensitiveSpan::new(
                EntityCategory::from_name(&finding.category),
                matched,
                finding.start,
                finding.end,
            ));
        }

        spans.sort_by_key(|s| (s.start, s.end));
        debug!(span_count = spans.len(), "detection complete");
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RedactionError;
    use crate::testing::MockClassifier;
    use crate::traits::Finding;

    fn dictionary() -> CustomDictionary {
        CustomDictionary::new("COUNTERPARTY_NAME", "v1").with_literal("Citibank")
    }

    #[tokio::test]
    async fn test_detect_maps_findings_to_spans() {
        let text = "Mail jane@example.com about Citibank.";
        let classifier = Arc::new(
            MockClassifier::new()
                .with_finding(text, Finding::new("EMAIL_ADDRESS", "jane@example.com", 5, 21)),
        );
        let adapter = DetectorAdapter::new(classifier);

        let spans = adapter
            .detect(text, &[EntityCategory::Email], &dictionary())
            .await
            .unwrap();

        // One predefined finding plus the dictionary literal.
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].category, EntityCategory::Email);
        assert_eq!(spans[0].text, "jane@example.com");
        assert_eq!(
            spans[1].category,
            EntityCategory::Custom("COUNTERPARTY_NAME".to_string())
        );
        assert_eq!(spans[1].text, "Citibank");
        assert_eq!(&text[spans[1].start..spans[1].end], "Citibank");
    }

    #[tokio::test]
    async fn test_out_of_bounds_finding_fails_detection() {
        let text = "short";
        let classifier = Arc::new(
            MockClassifier::new()
                .with_finding(text, Finding::new("EMAIL_ADDRESS", "ghost", 2, 50)),
        );
        let adapter = DetectorAdapter::new(classifier);

        let err = adapter
            .detect(text, &[EntityCategory::Email], &CustomDictionary::new("X", "v1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedactionError::DetectionUnavailable(DetectionError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_range_finding_fails_detection() {
        let text = "short";
        let classifier = Arc::new(
            MockClassifier::new().with_finding(text, Finding::new("EMAIL_ADDRESS", "", 3, 3)),
        );
        let adapter = DetectorAdapter::new(classifier);

        let err = adapter
            .detect(text, &[EntityCategory::Email], &CustomDictionary::new("X", "v1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedactionError::DetectionUnavailable(DetectionError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_char_boundary_finding_fails_detection() {
        let text = "café time";
        // 2..4 ends inside the two-byte 'é'.
        let classifier = Arc::new(
            MockClassifier::new().with_finding(text, Finding::new("PERSON_NAME", "fé", 2, 4)),
        );
        let adapter = DetectorAdapter::new(classifier);

        let err = adapter
            .detect(text, &[EntityCategory::PersonName], &CustomDictionary::new("X", "v1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedactionError::DetectionUnavailable(DetectionError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_classifier_failure_surfaces_as_detection_unavailable() {
        let classifier = Arc::new(MockClassifier::new().fail_unavailable());
        let adapter = DetectorAdapter::new(classifier);

        let err = adapter
            .detect("text", &[EntityCategory::Email], &dictionary())
            .await
            .unwrap_err();
        assert!(matches!(err, RedactionError::DetectionUnavailable(_)));
    }

    #[tokio::test]
    async fn test_spans_sorted_by_offset() {
        let text = "Citibank wrote to jane@example.com";
        let classifier = Arc::new(
            MockClassifier::new()
                .with_finding(text, Finding::new("EMAIL_ADDRESS", "jane@example.com", 18, 34)),
        );
        let adapter = DetectorAdapter::new(classifier);

        let spans = adapter
            .detect(text, &[EntityCategory::Email], &dictionary())
            .await
            .unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].start < spans[1].start);
        assert_eq!(spans[0].text, "Citibank");
    }
}
