//! The versioned rulebook: violation rules, presence rules, and the generic
//! implicit-authority-intent phrases.
//!
//! A [`RulebookSpec`] is plain data (built in, or loaded from JSON).
//! [`Rulebook::compile`] validates it and compiles every pattern once; the
//! resulting [`Rulebook`] is immutable and meant to be shared by reference
//! (typically behind an `Arc`) for the lifetime of the process.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Domain, Importance, PatternSet, RulebookError, Severity};

// ── Specification (serialisable) ──

/// Uncompiled violation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViolationRuleSpec {
    pub id: String,
    pub domain: Domain,
    pub severity: Severity,
    pub rationale: String,
    /// Any match triggers the rule.
    pub violation_patterns: Vec<String>,
    /// A match in authority text corroborates the rule.
    pub authority_patterns: Vec<String>,
}

/// Uncompiled presence (mandatory clause) rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresenceRuleSpec {
    pub id: String,
    pub domain: Domain,
    pub importance: Importance,
    pub description: String,
    /// Any one match satisfies the rule.
    pub required_patterns: Vec<String>,
}

/// Uncompiled rulebook, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulebookSpec {
    pub version: String,
    pub violation_rules: Vec<ViolationRuleSpec>,
    pub presence_rules: Vec<PresenceRuleSpec>,
    pub implicit_authority_phrases: Vec<String>,
}

impl RulebookSpec {
    /// The rulebook shipped with the crate.
    pub fn builtin() -> Self {
        crate::builtin::spec()
    }

    pub fn to_json_pretty(&self) -> Result<String, RulebookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Compiled rules ──

/// A compiled violation rule (red flag).
#[derive(Debug, Clone)]
pub struct ViolationRule {
    pub id: String,
    pub domain: Domain,
    pub base_severity: Severity,
    pub rationale: String,
    pub violation_patterns: PatternSet,
    pub authority_patterns: PatternSet,
}

/// A compiled presence rule (mandatory clause check).
#[derive(Debug, Clone)]
pub struct PresenceRule {
    pub id: String,
    pub domain: Domain,
    pub importance: Importance,
    pub description: String,
    pub required_patterns: PatternSet,
}

/// Validated, compiled rulebook. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Rulebook {
    version: String,
    violation_rules: Vec<ViolationRule>,
    presence_rules: Vec<PresenceRule>,
    implicit_intent: PatternSet,
}

impl Rulebook {
    /// Compile the built-in rulebook.
    pub fn builtin() -> Result<Self, RulebookError> {
        Self::compile(&RulebookSpec::builtin())
    }

    /// Parse and compile a JSON rulebook specification.
    pub fn from_json(json: &str) -> Result<Self, RulebookError> {
        let spec: RulebookSpec = serde_json::from_str(json)?;
        Self::compile(&spec)
    }

    /// Validate `spec` and compile all of its patterns.
    ///
    /// Either the whole rulebook compiles or nothing does: there is no
    /// partially loaded mode.
    pub fn compile(spec: &RulebookSpec) -> Result<Self, RulebookError> {
        if spec.version.trim().is_empty() {
            return Err(RulebookError::EmptyVersion);
        }

        let mut seen_ids: HashSet<&str> = HashSet::new();

        let mut violation_rules = Vec::with_capacity(spec.violation_rules.len());
        for rule in &spec.violation_rules {
            claim_id(&mut seen_ids, &rule.id)?;
            violation_rules.push(ViolationRule {
                id: rule.id.clone(),
                domain: rule.domain,
                base_severity: rule.severity,
                rationale: rule.rationale.clone(),
                violation_patterns: PatternSet::compile(
                    &rule.id,
                    "violation patterns",
                    &rule.violation_patterns,
                )?,
                authority_patterns: PatternSet::compile(
                    &rule.id,
                    "authority patterns",
                    &rule.authority_patterns,
                )?,
            });
        }

        let mut presence_rules = Vec::with_capacity(spec.presence_rules.len());
        for rule in &spec.presence_rules {
            claim_id(&mut seen_ids, &rule.id)?;
            presence_rules.push(PresenceRule {
                id: rule.id.clone(),
                domain: rule.domain,
                importance: rule.importance,
                description: rule.description.clone(),
                required_patterns: PatternSet::compile(
                    &rule.id,
                    "required patterns",
                    &rule.required_patterns,
                )?,
            });
        }

        let implicit_intent = PatternSet::compile(
            "implicit_authority_phrases",
            "phrases",
            &spec.implicit_authority_phrases,
        )?;

        tracing::info!(
            version = %spec.version,
            violation_rules = violation_rules.len(),
            presence_rules = presence_rules.len(),
            "rulebook compiled"
        );

        Ok(Self {
            version: spec.version.clone(),
            violation_rules,
            presence_rules,
            implicit_intent,
        })
    }

    /// Reconstruct the specification this rulebook was compiled from.
    pub fn to_spec(&self) -> RulebookSpec {
        RulebookSpec {
            version: self.version.clone(),
            violation_rules: self
                .violation_rules
                .iter()
                .map(|r| ViolationRuleSpec {
                    id: r.id.clone(),
                    domain: r.domain,
                    severity: r.base_severity,
                    rationale: r.rationale.clone(),
                    violation_patterns: r.violation_patterns.sources(),
                    authority_patterns: r.authority_patterns.sources(),
                })
                .collect(),
            presence_rules: self
                .presence_rules
                .iter()
                .map(|r| PresenceRuleSpec {
                    id: r.id.clone(),
                    domain: r.domain,
                    importance: r.importance,
                    description: r.description.clone(),
                    required_patterns: r.required_patterns.sources(),
                })
                .collect(),
            implicit_authority_phrases: self.implicit_intent.sources(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Violation rules in declaration order.
    pub fn violation_rules(&self) -> &[ViolationRule] {
        &self.violation_rules
    }

    /// Presence rules in declaration order.
    pub fn presence_rules(&self) -> &[PresenceRule] {
        &self.presence_rules
    }

    /// Generic regulatory-intent phrases used when no explicit authority
    /// pattern of a rule matches.
    pub fn implicit_intent(&self) -> &PatternSet {
        &self.implicit_intent
    }

    pub fn violation_rule(&self, id: &str) -> Option<&ViolationRule> {
        self.violation_rules.iter().find(|r| r.id == id)
    }

    pub fn presence_rule(&self, id: &str) -> Option<&PresenceRule> {
        self.presence_rules.iter().find(|r| r.id == id)
    }
}

/// Rule ids must be non-empty and unique across both rule kinds.
fn claim_id<'s>(seen: &mut HashSet<&'s str>, id: &'s str) -> Result<(), RulebookError> {
    if id.trim().is_empty() {
        return Err(RulebookError::EmptyRuleId);
    }
    if !seen.insert(id) {
        return Err(RulebookError::DuplicateRuleId(id.to_string()));
    }
    Ok(())
}
