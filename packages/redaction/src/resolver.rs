//! Canonical pseudonym resolver: precompute dictionary tokens.
//!
//! Runs once per request, independent of the document, so cost is
//! proportional to dictionary size. Uses the identical tokenize path
//! (same wrapped key, context, alphabet) as the transform engine, so
//! the resulting table matches the tokens emitted inline.

use tracing::debug;

use crate::error::Result;
use crate::policy::PolicyEngine;
use crate::traits::FormatPreservingEncoder;
use crate::types::{CustomDictionary, PseudonymTable, TransformationKind, WrappedKey};

/// Build the literal↔token table for one dictionary under one key.
///
/// `key` must be the same `WrappedKey` instance used to transform the
/// document in this request; a different key breaks determinism and
/// restoration silently fails.
///
/// A dictionary whose category resolves to `Redact` (or to no rule)
/// yields an empty table: opaque placeholders are never restored.
pub async fn resolve_pseudonyms(
    dictionary: &CustomDictionary,
    policy: &PolicyEngine,
    key: &WrappedKey,
    encoder: &dyn FormatPreservingEncoder,
) -> Result<PseudonymTable> {
    let mut table = PseudonymTable::new();

    let Some(TransformationKind::Tokenize { alphabet, context }) =
        policy.resolve(&dictionary.category())
    else {
        debug!(
            dictionary = %dictionary.name,
            "dictionary category is not tokenized; no pseudonyms to precompute"
        );
        return Ok(table);
    };

    for literal in &dictionary.literals {
        let token = encoder.encode(literal, key, context, alphabet).await?;
        table.insert(literal.clone(), token);
    }

    debug!(
        dictionary = %dictionary.name,
        version = %dictionary.version,
        entries = table.len(),
        "pseudonym table built"
    );
    Ok(table)
}
