//! Clause-level red-flag detection.
//!
//! Evaluates every violation rule, in rulebook order, against one clause.
//! Authority chunks corroborate a firing rule through two ordered tiers: the
//! rule's own authority patterns, then the rulebook's generic
//! implicit-authority-intent phrases. Corroboration raises confidence
//! (severity) but, unless required by the caller, does not decide whether a
//! rule fires.

use std::ops::ControlFlow;

use clauseguard_core::finding::{
    CLAUSE_PATTERN_ONLY_MARKER, DEFAULT_AUTHORITY_SOURCE, IMPLICIT_AUTHORITY_MARKER,
};
use clauseguard_core::{
    AuthorityChunk, AuthorityExcerpt, Domain, Finding, Pattern, PatternSet, Rulebook, Severity,
    ViolationRule, excerpt, normalize_text,
};
use tracing::{debug, warn};

/// Appended to the rationale of findings no authority chunk corroborated.
pub const VERIFICATION_CAVEAT: &str =
    "(Note: no explicit authority match in retrieved documents - verify manually)";

/// Severity before corroboration is taken into account.
///
/// Jurisdiction (ouster-of-forum) rules are always CRITICAL regardless of
/// their declared base severity.
pub fn escalated_severity(rule: &ViolationRule) -> Severity {
    match rule.domain {
        Domain::Jurisdiction => Severity::Critical,
        _ => rule.base_severity,
    }
}

/// Red-flag detector bound to a rulebook.
pub struct RedFlagDetector<'r> {
    rulebook: &'r Rulebook,
    preview_chars: usize,
}

impl<'r> RedFlagDetector<'r> {
    /// `preview_chars` bounds the original authority text kept for citation.
    pub fn new(rulebook: &'r Rulebook, preview_chars: usize) -> Self {
        Self {
            rulebook,
            preview_chars,
        }
    }

    /// Findings for one clause.
    ///
    /// Empty clause text yields no findings. Evaluation stops at the first
    /// finding whose final severity is CRITICAL and which authority text
    /// corroborates; that finding is included.
    pub fn detect(
        &self,
        clause_text: &str,
        authority: &[AuthorityChunk],
        require_authority_support: bool,
    ) -> Vec<Finding> {
        if clause_text.trim().is_empty() {
            return Vec::new();
        }
        let excerpts = self.prepare_authority(authority);
        self.detect_prepared(clause_text, &excerpts, require_authority_support)
    }

    /// [`detect`](Self::detect) against excerpts already built by
    /// [`prepare_authority`](Self::prepare_authority).
    pub fn detect_prepared(
        &self,
        clause_text: &str,
        excerpts: &[AuthorityExcerpt],
        require_authority_support: bool,
    ) -> Vec<Finding> {
        let clause = normalize_text(clause_text);
        if clause.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();

        for rule in self.rulebook.violation_rules() {
            match self.evaluate_rule(rule, &clause, excerpts, require_authority_support) {
                ControlFlow::Continue(Some(finding)) => findings.push(finding),
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(finding) => {
                    debug!(rule_id = %finding.rule_id, "corroborated critical finding, stopping");
                    findings.push(finding);
                    break;
                }
            }
        }

        findings
    }

    /// Normalise each usable authority chunk. Chunks without text are
    /// skipped with a warning.
    pub fn prepare_authority(&self, authority: &[AuthorityChunk]) -> Vec<AuthorityExcerpt> {
        let mut excerpts = Vec::with_capacity(authority.len());
        for (idx, chunk) in authority.iter().enumerate() {
            let original = chunk.text.as_deref().unwrap_or_default();
            let text = normalize_text(original);
            if text.is_empty() {
                warn!(
                    chunk = idx,
                    source_id = chunk.source_id.as_deref().unwrap_or(DEFAULT_AUTHORITY_SOURCE),
                    "authority chunk has no usable text, skipped"
                );
                continue;
            }
            excerpts.push(AuthorityExcerpt {
                text,
                source_id: chunk
                    .source_id
                    .clone()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_AUTHORITY_SOURCE.to_string()),
                original_excerpt_preview: excerpt(original, self.preview_chars).to_string(),
            });
        }
        excerpts
    }

    /// Evaluate one rule.
    ///
    /// `Continue(None)`: the rule did not fire. `Continue(Some)`: it fired.
    /// `Break`: it fired with a corroborated CRITICAL severity and no later
    /// rule should be evaluated for this clause.
    fn evaluate_rule(
        &self,
        rule: &ViolationRule,
        clause: &str,
        excerpts: &[AuthorityExcerpt],
        require_authority_support: bool,
    ) -> ControlFlow<Finding, Option<Finding>> {
        let violation_hits = rule.violation_patterns.matches(clause);
        if violation_hits.is_empty() {
            return ControlFlow::Continue(None);
        }

        let implicit = self.rulebook.implicit_intent();
        let mut authority_hits: Vec<String> = Vec::new();
        let mut support: Vec<AuthorityExcerpt> = Vec::new();
        for ex in excerpts {
            if let Some(corroboration) = corroborate(rule, implicit, &ex.text) {
                for label in corroboration.labels() {
                    push_unique(&mut authority_hits, label);
                }
                support.push(ex.clone());
            }
        }

        let has_authority_support = !support.is_empty();
        if !has_authority_support && require_authority_support {
            return ControlFlow::Continue(None);
        }

        let mut severity = escalated_severity(rule);
        let mut reason = rule.rationale.clone();
        if !has_authority_support {
            severity = severity.demoted();
            reason = format!("{reason} {VERIFICATION_CAVEAT}");
        }
        if authority_hits.is_empty() {
            authority_hits.push(CLAUSE_PATTERN_ONLY_MARKER.to_string());
        }

        let mut matched_violation_patterns = Vec::with_capacity(violation_hits.len());
        for p in violation_hits {
            push_unique(&mut matched_violation_patterns, p.as_str());
        }

        debug!(
            rule_id = %rule.id,
            severity = %severity,
            supported = has_authority_support,
            "violation rule fired"
        );

        let finding = Finding {
            rule_id: rule.id.clone(),
            domain: rule.domain,
            severity,
            reason,
            matched_violation_patterns,
            matched_authority_patterns: authority_hits,
            authority_support: support,
            has_authority_support,
            clause_source: None,
        };

        if severity == Severity::Critical && has_authority_support {
            ControlFlow::Break(finding)
        } else {
            ControlFlow::Continue(Some(finding))
        }
    }
}

// ── Corroboration tiers ──

/// How one authority chunk corroborated a rule.
enum Corroboration<'r> {
    /// The rule's own authority patterns that matched.
    Explicit(Vec<&'r Pattern>),
    /// Only generic regulatory-intent language matched.
    ImplicitIntent,
}

impl Corroboration<'_> {
    fn labels(&self) -> Vec<&str> {
        match self {
            Self::Explicit(patterns) => patterns.iter().map(|p| p.as_str()).collect(),
            Self::ImplicitIntent => vec![IMPLICIT_AUTHORITY_MARKER],
        }
    }
}

/// Matchers tried in order; the first one that hits wins.
#[derive(Debug, Clone, Copy)]
enum Tier {
    Explicit,
    ImplicitIntent,
}

const TIERS: [Tier; 2] = [Tier::Explicit, Tier::ImplicitIntent];

impl Tier {
    fn evaluate<'r>(
        self,
        rule: &'r ViolationRule,
        implicit: &PatternSet,
        text: &str,
    ) -> Option<Corroboration<'r>> {
        match self {
            Self::Explicit => {
                let hits = rule.authority_patterns.matches(text);
                (!hits.is_empty()).then_some(Corroboration::Explicit(hits))
            }
            Self::ImplicitIntent => implicit
                .any_match(text)
                .then_some(Corroboration::ImplicitIntent),
        }
    }
}

fn corroborate<'r>(
    rule: &'r ViolationRule,
    implicit: &PatternSet,
    text: &str,
) -> Option<Corroboration<'r>> {
    TIERS
        .iter()
        .find_map(|tier| tier.evaluate(rule, implicit, text))
}

fn push_unique(out: &mut Vec<String>, value: &str) {
    if !out.iter().any(|v| v == value) {
        out.push(value.to_string());
    }
}
