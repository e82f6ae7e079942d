//! Sensitive spans and the categories that classify them.

use serde::{Deserialize, Serialize};

/// An entity category the classifier can detect.
///
/// Built-in categories map to the classifier's own detector names;
/// `Custom` categories are defined by a dictionary of literal values
/// (see [`CustomDictionary`](crate::types::CustomDictionary)).
///
/// Categories are configuration: loaded once, shared read-only across
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Email,
    PhoneNumber,
    PersonName,
    Location,
    /// Dictionary-defined category, named by its classifier tag
    /// (e.g. `COUNTERPARTY_NAME`)
    Custom(String),
}

impl EntityCategory {
    /// The classifier-facing name for this category.
    pub fn name(&self) -> &str {
        match self {
            Self::Email => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::PersonName => "PERSON_NAME",
            Self::Location => "LOCATION",
            Self::Custom(name) => name,
        }
    }

    /// Map a classifier-reported category name back to a category.
    ///
    /// Unknown names become `Custom` so dictionary categories survive
    /// the round trip through the external classifier.
    pub fn from_name(name: &str) -> Self {
        match name {
            "EMAIL_ADDRESS" => Self::Email,
            "PHONE_NUMBER" => Self::PhoneNumber,
            "PERSON_NAME" => Self::PersonName,
            "LOCATION" => Self::Location,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Whether this is a dictionary-defined category.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A located, categorized substring of one document flagged as sensitive.
///
/// Produced by the detector adapter, consumed once by the transform
/// engine. Offsets are byte offsets into the original document and are
/// guaranteed to lie on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveSpan {
    /// Category the classifier assigned
    pub category: EntityCategory,

    /// The matched text, as it appears in the document
    pub text: String,

    /// Byte offset of the first matched byte
    pub start: usize,

    /// Byte offset one past the last matched byte
    pub end: usize,
}

impl SensitiveSpan {
    /// Create a new span.
    pub fn new(category: EntityCategory, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            category,
            text: text.into(),
            start,
            end,
        }
    }

    /// Byte length of the matched text.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never produced by a valid detector).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether this span's byte range intersects another's.
    pub fn overlaps(&self, other: &SensitiveSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Short description used in error messages; deliberately omits the
    /// matched text so sensitive values never reach error output.
    pub fn describe(&self) -> String {
        format!("{}@{}..{}", self.category, self.start, self.end)
    }
}
