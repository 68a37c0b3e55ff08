//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for one engine instance.
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fire a violation rule only when authority text corroborates it.
    ///
    /// Off by default: a clause pattern alone is enough to flag, and
    /// corroboration only affects severity.
    pub require_authority_support: bool,
    /// Characters of the clause excerpt used in the deduplication key.
    pub dedup_prefix_chars: usize,
    /// Characters of clause text kept in a finding's clause source.
    pub clause_excerpt_chars: usize,
    /// Characters of original authority text kept for citation.
    pub authority_preview_chars: usize,
    /// Authority excerpts cited per finding in the narrative brief.
    pub max_cited_support: usize,
    /// Words per chunk when a document has no clause sections.
    pub chunk_words: usize,
    /// Words shared between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            require_authority_support: false,
            dedup_prefix_chars: 50,
            clause_excerpt_chars: 200,
            authority_preview_chars: 240,
            max_cited_support: 3,
            chunk_words: 400,
            chunk_overlap: 50,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
