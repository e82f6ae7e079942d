//! Restoration engine: substitute tokens back to literals.
//!
//! This is a heuristic, not a cryptographic reversal: it assumes the
//! generator reproduced tokens verbatim. A token the generator altered
//! (truncated, re-cased, punctuated into) is simply not restored, and
//! the output stays tokenized at that spot. That is degraded output,
//! not an error. Nothing is decrypted here.

use tracing::debug;

use crate::types::PseudonymTable;

/// Replace every verbatim occurrence of a table token with its literal.
///
/// Longer tokens are substituted first so a token that happens to be a
/// substring of another cannot clobber it.
pub fn restore_text(generated: &str, table: &PseudonymTable) -> String {
    let mut pairs: Vec<(&str, &str)> = table
        .iter()
        .map(|(literal, token)| (literal.as_str(), token.as_str()))
        .collect();
    pairs.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.1.cmp(b.1)));

    let mut output = generated.to_string();
    let mut restored = 0usize;
    for (literal, token) in pairs {
        if token.is_empty() {
            continue;
        }
        if output.contains(token) {
            output = output.replace(token, literal);
            restored += 1;
        }
    }

    debug!(restored, table_size = table.len(), "restoration pass complete");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> PseudonymTable {
        let mut table = PseudonymTable::new();
        for (literal, token) in pairs {
            table.insert(*literal, *token);
        }
        table
    }

    #[test]
    fn test_restores_verbatim_tokens() {
        let table = table(&[("Citibank", "Xuqfpwlr")]);
        let out = restore_text("Counterparty 1: Xuqfpwlr", &table);
        assert_eq!(out, "Counterparty 1: Citibank");
    }

    #[test]
    fn test_restores_all_occurrences() {
        let table = table(&[("Citibank", "Xuqfpwlr")]);
        let out = restore_text("Xuqfpwlr pays Xuqfpwlr.", &table);
        assert_eq!(out, "Citibank pays Citibank.");
    }

    #[test]
    fn test_altered_token_left_unresolved() {
        // Trailing character changed by the generator: the literal must
        // NOT appear. Degraded output, not a failure.
        let table = table(&[("Citibank", "Xuqfpwlr")]);
        let out = restore_text("Counterparty 1: Xuqfpwlq.", &table);
        assert!(!out.contains("Citibank"));
        assert!(out.contains("Xuqfpwlq"));
    }

    #[test]
    fn test_longest_token_first() {
        // "AbcDef" contains "Abc"; substituting the short token first
        // would corrupt the long one.
        let table = table(&[("Globex", "Abc"), ("Initech", "AbcDef")]);
        let out = restore_text("paid by AbcDef and Abc", &table);
        assert_eq!(out, "paid by Initech and Globex");
    }

    #[test]
    fn test_empty_table_is_identity() {
        let out = restore_text("nothing to do", &PseudonymTable::new());
        assert_eq!(out, "nothing to do");
    }
}
