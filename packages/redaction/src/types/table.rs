//! The pseudonym table and the transformed document that carries it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bidirectional literal↔token mapping for one request.
///
/// Built once per dictionary + key/context/alphabet combination by the
/// pseudonym resolver. Read-only after construction and owned by the
/// request that built it; reusing a table against a different wrapped
/// key silently breaks restoration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudonymTable {
    entries: HashMap<String, String>,
}

impl PseudonymTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a literal→token pair.
    pub fn insert(&mut self, literal: impl Into<String>, token: impl Into<String>) {
        self.entries.insert(literal.into(), token.into());
    }

    /// Token for a dictionary literal, if present.
    pub fn token_for(&self, literal: &str) -> Option<&str> {
        self.entries.get(literal).map(String::as_str)
    }

    /// Literal behind a token, if present.
    pub fn literal_for(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, t)| t.as_str() == token)
            .map(|(l, _)| l.as_str())
    }

    /// Iterate (literal, token) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Number of pairs in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the transform stage: the rewritten text plus the table
/// needed to restore dictionary literals in generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedDocument {
    /// Document text with every detected span replaced
    pub text: String,

    /// Literal↔token table for the request's dictionary
    pub table: PseudonymTable,
}
