//! Transformation rules: what happens to each detected category.

use serde::{Deserialize, Serialize};

use crate::types::span::EntityCategory;

/// How a detected span is transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformationKind {
    /// Replace with an opaque `[CATEGORY]` placeholder. Non-reversible.
    Redact,

    /// Replace with a deterministic format-preserving encoding keyed by
    /// the request's wrapped key. Reversible in principle; reversed in
    /// practice through the pseudonym table.
    Tokenize {
        /// Characters the token may be drawn from
        alphabet: String,
        /// Tweak value mixed into the encoding; the same literal under
        /// a different context yields a different token
        context: String,
    },
}

impl TransformationKind {
    /// Convenience constructor for a tokenize rule.
    pub fn tokenize(alphabet: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Tokenize {
            alphabet: alphabet.into(),
            context: context.into(),
        }
    }
}

/// One policy rule: a set of categories and the transformation applied
/// to spans of those categories.
///
/// Exactly one rule may claim a category; overlap is rejected when the
/// policy engine is built, not at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRule {
    /// Categories this rule claims
    pub categories: Vec<EntityCategory>,

    /// Transformation applied to spans of those categories
    pub kind: TransformationKind,
}

impl TransformationRule {
    /// Create a rule with no categories yet.
    pub fn new(kind: TransformationKind) -> Self {
        Self {
            categories: Vec::new(),
            kind,
        }
    }

    /// Create a redact rule over the given categories.
    pub fn redact(categories: impl IntoIterator<Item = EntityCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            kind: TransformationKind::Redact,
        }
    }

    /// Create a tokenize rule over the given categories.
    pub fn tokenize(
        categories: impl IntoIterator<Item = EntityCategory>,
        alphabet: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            kind: TransformationKind::tokenize(alphabet, context),
        }
    }

    /// Add a category to this rule.
    pub fn with_category(mut self, category: EntityCategory) -> Self {
        self.categories.push(category);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builders() {
        let rule = TransformationRule::tokenize(
            [EntityCategory::Custom("COUNTERPARTY_NAME".to_string())],
            "ABC",
            "ctx1",
        );
        assert_eq!(rule.categories.len(), 1);
        assert_eq!(rule.kind, TransformationKind::tokenize("ABC", "ctx1"));

        let rule = TransformationRule::redact([EntityCategory::Email])
            .with_category(EntityCategory::PhoneNumber);
        assert_eq!(rule.categories.len(), 2);
        assert_eq!(rule.kind, TransformationKind::Redact);
    }
}
