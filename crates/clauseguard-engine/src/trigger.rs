//! Decide whether a user request asks for a compliance evaluation.

const COMPLIANCE_KEYWORDS: &[&str] = &[
    "red flag",
    "redflag",
    "red flags",
    "redflags",
    "violation",
    "violations",
    "non-compliant",
    "noncompliant",
    "issue",
    "issues",
    "problem",
    "problems",
    "check compliance",
    "compliance check",
    "verify compliance",
];

/// The query mentions red flags, violations or a compliance check.
///
/// Matching is a case-insensitive substring test, so "issues" also matches
/// "issue".
pub fn is_compliance_query(query: &str) -> bool {
    let query = query.to_lowercase();
    COMPLIANCE_KEYWORDS.iter().any(|kw| query.contains(kw))
}

/// Run the aggregator when explicitly asked or when the query implies it.
///
/// For embedders that route free-form questions and decide whether to call
/// [`DecisionEngine::evaluate`](crate::DecisionEngine::evaluate) at all. The
/// CLI `evaluate` command is always an explicit request and does not consult it.
pub fn should_evaluate(explicit: bool, query: &str) -> bool {
    explicit || is_compliance_query(query)
}
