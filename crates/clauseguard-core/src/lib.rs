//! Core types, rulebook, text normalisation and pattern matching for ClauseGuard.

mod builtin;
pub mod chunk;
pub mod config;
pub mod domain;
mod error;
pub mod finding;
pub mod normalize;
pub mod pattern;
pub mod rulebook;
pub mod severity;

pub use chunk::chunk_words;
pub use config::EngineConfig;
pub use domain::Domain;
pub use error::RulebookError;
pub use finding::{
    AuthorityChunk, AuthorityExcerpt, ClauseSource, ComplianceResult, ComplianceStatus,
    ComplianceSummary, Finding,
};
pub use normalize::{excerpt, normalize_text};
pub use pattern::{Pattern, PatternSet};
pub use rulebook::{
    PresenceRule, PresenceRuleSpec, Rulebook, RulebookSpec, ViolationRule, ViolationRuleSpec,
};
pub use severity::{Importance, Severity};
