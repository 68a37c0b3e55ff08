use thiserror::Error;

/// Structural problems with a rulebook. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum RulebookError {
    #[error("rulebook version must not be empty")]
    EmptyVersion,

    #[error("rule id must not be empty")]
    EmptyRuleId,

    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("rule {rule_id} has no {set}")]
    EmptyPatternSet { rule_id: String, set: &'static str },

    #[error("rule {rule_id} repeats pattern {pattern:?} in its {set}")]
    DuplicatePattern {
        rule_id: String,
        set: &'static str,
        pattern: String,
    },

    #[error("rule {rule_id}: invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        rule_id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed rulebook JSON: {0}")]
    Json(#[from] serde_json::Error),
}
