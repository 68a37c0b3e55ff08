//! Evaluation inputs and results exchanged with the engine's collaborators.
//!
//! None of these are authoritative state: they are built per evaluation call
//! and handed to the caller.

use serde::{Deserialize, Serialize};

use crate::{Domain, Importance, Severity};

/// Marker reported in `matched_authority_patterns` when an authority chunk
/// corroborated a rule only through generic regulatory-intent language.
pub const IMPLICIT_AUTHORITY_MARKER: &str = "[implicit_authority_intent]";

/// Marker reported in `matched_authority_patterns` when the clause matched but
/// no authority chunk corroborated the rule.
pub const CLAUSE_PATTERN_ONLY_MARKER: &str = "[clause_pattern_only]";

/// Source label for authority chunks that arrive without one.
pub const DEFAULT_AUTHORITY_SOURCE: &str = "authority";

/// Authority excerpt as supplied by the retrieval subsystem.
///
/// Both fields are optional on the wire: a chunk without usable text is
/// skipped, a chunk without a source gets [`DEFAULT_AUTHORITY_SOURCE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityChunk {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "filename")]
    pub source_id: Option<String>,
}

impl AuthorityChunk {
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            source_id: Some(source_id.into()),
        }
    }
}

/// An authority chunk prepared for matching: normalised text plus a preview
/// of the original for citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityExcerpt {
    /// Normalised text. Used for matching only, not emitted.
    #[serde(default, skip_serializing)]
    pub text: String,
    pub source_id: String,
    pub original_excerpt_preview: String,
}

/// Where a finding's clause came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSource {
    pub document: String,
    pub section: String,
    /// Leading characters of the clause text.
    pub excerpt: String,
}

/// One triggered violation rule for one clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub domain: Domain,
    pub severity: Severity,
    pub reason: String,
    pub matched_violation_patterns: Vec<String>,
    pub matched_authority_patterns: Vec<String>,
    pub authority_support: Vec<AuthorityExcerpt>,
    pub has_authority_support: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_source: Option<ClauseSource>,
}

impl Finding {
    /// Deduplication key: rule id plus the first `prefix_chars` characters of
    /// the clause excerpt (empty when the finding has no clause source).
    pub fn dedup_key(&self, prefix_chars: usize) -> (String, String) {
        let prefix = self
            .clause_source
            .as_ref()
            .map(|src| crate::excerpt(&src.excerpt, prefix_chars).to_string())
            .unwrap_or_default();
        (self.rule_id.clone(), prefix)
    }
}

/// Outcome of one presence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    Missing,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::Missing => "MISSING",
        }
    }
}

/// Result of one presence rule against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub rule_id: String,
    pub domain: Domain,
    pub importance: Importance,
    pub description: String,
    pub status: ComplianceStatus,
    /// First required pattern that matched, in declaration order.
    pub matched_pattern: Option<String>,
}

impl ComplianceResult {
    pub fn is_missing(&self) -> bool {
        self.status == ComplianceStatus::Missing
    }
}

/// Counts of satisfied and missing mandatory clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_checks: usize,
    pub compliant_count: usize,
    pub missing_count: usize,
    pub critical_missing: Vec<ComplianceResult>,
    pub high_missing: Vec<ComplianceResult>,
    pub medium_missing: Vec<ComplianceResult>,
    /// No CRITICAL or HIGH clause is missing.
    pub is_compliant: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding_with_excerpt(rule_id: &str, excerpt: Option<&str>) -> Finding {
        Finding {
            rule_id: rule_id.into(),
            domain: Domain::Refund,
            severity: Severity::High,
            reason: "r".into(),
            matched_violation_patterns: vec![],
            matched_authority_patterns: vec![],
            authority_support: vec![],
            has_authority_support: false,
            clause_source: excerpt.map(|e| ClauseSource {
                document: "doc".into(),
                section: "Section 1".into(),
                excerpt: e.into(),
            }),
        }
    }

    #[test]
    fn dedup_key_uses_excerpt_prefix() {
        let a = finding_with_excerpt("RF-REFUND-001", Some("abcdefgh-one"));
        let b = finding_with_excerpt("RF-REFUND-001", Some("abcdefgh-two"));
        assert_eq!(a.dedup_key(8), b.dedup_key(8));
        assert_ne!(a.dedup_key(12), b.dedup_key(12));
    }

    #[test]
    fn dedup_key_without_source() {
        let f = finding_with_excerpt("RF-AREA-001", None);
        assert_eq!(f.dedup_key(50), ("RF-AREA-001".to_string(), String::new()));
    }

    #[test]
    fn authority_chunk_accepts_filename_alias() {
        let chunk: AuthorityChunk =
            serde_json::from_str(r#"{"text": "Section 18", "filename": "rera_act.pdf"}"#).unwrap();
        assert_eq!(chunk.source_id.as_deref(), Some("rera_act.pdf"));

        let bare: AuthorityChunk = serde_json::from_str("{}").unwrap();
        assert!(bare.text.is_none());
        assert!(bare.source_id.is_none());
    }

    #[test]
    fn excerpt_text_is_not_serialised() {
        let excerpt = AuthorityExcerpt {
            text: "normalised body".into(),
            source_id: "act.pdf".into(),
            original_excerpt_preview: "Normalised body".into(),
        };
        let json = serde_json::to_value(&excerpt).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["source_id"], "act.pdf");
    }
}
