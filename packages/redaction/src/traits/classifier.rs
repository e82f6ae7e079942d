//! Classifier trait for external sensitive-entity detection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DetectionError;
use crate::types::{CustomDictionary, EntityCategory};

/// A located finding as reported by the external classifier, before
/// the detector adapter validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Classifier's category name for the match
    pub category: String,

    /// The matched text as the classifier quoted it
    pub quote: String,

    /// Byte offset of the first matched byte
    pub start: usize,

    /// Byte offset one past the last matched byte
    pub end: usize,
}

impl Finding {
    /// Create a new finding.
    pub fn new(category: impl Into<String>, quote: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            category: category.into(),
            quote: quote.into(),
            start,
            end,
        }
    }
}

/// External classification capability.
///
/// Given built-in category names plus a literal word list, returns
/// matched spans with category and quoted text. Detection itself is a
/// black box; implementations wrap a specific inspection service.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Inspect `text` for the given categories and dictionary.
    async fn inspect(
        &self,
        text: &str,
        categories: &[EntityCategory],
        dictionary: &CustomDictionary,
    ) -> Result<Vec<Finding>, DetectionError>;
}
