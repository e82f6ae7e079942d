//! Policy engine: category → transformation resolution.
//!
//! Built once from static configuration and shared read-only across
//! requests. All validation happens at construction; `resolve` never
//! fails at request time.

use std::collections::HashMap;

use crate::error::PolicyConfigError;
use crate::types::{EntityCategory, TransformationKind, TransformationRule};

/// Resolves each entity category to its transformation.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    kinds: HashMap<EntityCategory, TransformationKind>,
    /// Categories in rule declaration order, for deterministic
    /// detection requests
    categories: Vec<EntityCategory>,
}

impl PolicyEngine {
    /// Build the engine from a rule set, validating that categories are
    /// partitioned without overlap and that every tokenize rule carries
    /// a usable alphabet and a context tag.
    pub fn new(rules: Vec<TransformationRule>) -> Result<Self, PolicyConfigError> {
        let mut kinds = HashMap::new();
        let mut categories = Vec::new();

        for rule in rules {
            if let TransformationKind::Tokenize { alphabet, context } = &rule.kind {
                let claimed = rule
                    .categories
                    .first()
                    .map(|c| c.name().to_string())
                    .unwrap_or_default();
                validate_alphabet(alphabet, &claimed)?;
                if context.is_empty() {
                    return Err(PolicyConfigError::EmptyContext { category: claimed });
                }
            }

            for category in rule.categories {
                if kinds.contains_key(&category) {
                    return Err(PolicyConfigError::DuplicateCategory {
                        category: category.name().to_string(),
                    });
                }
                categories.push(category.clone());
                kinds.insert(category, rule.kind.clone());
            }
        }

        Ok(Self { kinds, categories })
    }

    /// Transformation for a category, if any rule claims it.
    pub fn resolve(&self, category: &EntityCategory) -> Option<&TransformationKind> {
        self.kinds.get(category)
    }

    /// All claimed categories, in rule declaration order. Drives the
    /// detection request, so only categories with a transformation are
    /// ever detected.
    pub fn categories(&self) -> &[EntityCategory] {
        &self.categories
    }
}

fn validate_alphabet(alphabet: &str, category: &str) -> Result<(), PolicyConfigError> {
    if alphabet.is_empty() {
        return Err(PolicyConfigError::InvalidAlphabet {
            category: category.to_string(),
            reason: "alphabet is empty".to_string(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for ch in alphabet.chars() {
        if !seen.insert(ch) {
            return Err(PolicyConfigError::InvalidAlphabet {
                category: category.to_string(),
                reason: format!("duplicate character {:?}", ch),
            });
        }
    }

    if seen.len() < 2 {
        return Err(PolicyConfigError::InvalidAlphabet {
            category: category.to_string(),
            reason: "alphabet needs at least two distinct characters".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counterparty() -> EntityCategory {
        EntityCategory::Custom("COUNTERPARTY_NAME".to_string())
    }

    #[test]
    fn test_resolve_per_category() {
        let policy = PolicyEngine::new(vec![
            TransformationRule::redact([EntityCategory::Email, EntityCategory::PhoneNumber]),
            TransformationRule::tokenize([counterparty()], "ABCDEF", "ctx1"),
        ])
        .unwrap();

        assert_eq!(
            policy.resolve(&EntityCategory::Email),
            Some(&TransformationKind::Redact)
        );
        assert_eq!(
            policy.resolve(&counterparty()),
            Some(&TransformationKind::tokenize("ABCDEF", "ctx1"))
        );
        assert_eq!(policy.resolve(&EntityCategory::Location), None);
        assert_eq!(policy.categories().len(), 3);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = PolicyEngine::new(vec![
            TransformationRule::redact([EntityCategory::Email]),
            TransformationRule::tokenize([EntityCategory::Email], "ABC", "ctx"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            PolicyConfigError::DuplicateCategory {
                category: "EMAIL_ADDRESS".to_string()
            }
        );
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let err =
            PolicyEngine::new(vec![TransformationRule::tokenize([counterparty()], "", "ctx")])
                .unwrap_err();
        assert!(matches!(err, PolicyConfigError::InvalidAlphabet { .. }));
    }

    #[test]
    fn test_duplicate_alphabet_char_rejected() {
        let err =
            PolicyEngine::new(vec![TransformationRule::tokenize([counterparty()], "ABA", "ctx")])
                .unwrap_err();
        assert!(matches!(err, PolicyConfigError::InvalidAlphabet { .. }));
    }

    #[test]
    fn test_empty_context_rejected() {
        let err =
            PolicyEngine::new(vec![TransformationRule::tokenize([counterparty()], "ABC", "")])
                .unwrap_err();
        assert_eq!(
            err,
            PolicyConfigError::EmptyContext {
                category: "COUNTERPARTY_NAME".to_string()
            }
        );
    }

    #[test]
    fn test_empty_policy_is_valid() {
        let policy = PolicyEngine::new(vec![]).unwrap();
        assert!(policy.categories().is_empty());
    }
}
