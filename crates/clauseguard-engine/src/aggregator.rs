//! Per-document decision aggregation.
//!
//! Composes the compliance verifier (once on the full text) with the
//! red-flag detector (once per clause, plus once on the user's query) and
//! folds the results into a single [`Decision`].

use std::collections::HashSet;
use std::sync::Arc;

use clauseguard_core::{
    AuthorityChunk, ClauseSource, ComplianceResult, ComplianceSummary, EngineConfig, Finding,
    Rulebook, chunk_words, excerpt,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::detector::RedFlagDetector;
use crate::narrative::ExplanationStrategy;
use crate::verifier::{ComplianceVerifier, summarize_compliance};

/// Document label for findings raised by the user's own query text.
pub const USER_QUERY_DOCUMENT: &str = "user_query";

const DEFAULT_DOCUMENT: &str = "document";

/// One section of a user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Empty sections are labelled `Section N` by position.
    #[serde(default)]
    pub section: String,
    pub text: String,
}

impl Clause {
    pub fn new(section: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            text: text.into(),
        }
    }
}

/// Everything the engine needs to judge one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default = "default_document")]
    pub document: String,
    pub full_text: String,
    /// Per-section clause texts. When empty the full text is split into
    /// word windows instead.
    #[serde(default)]
    pub clauses: Vec<Clause>,
    /// Free text from the user; may itself be a pasted clause.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub authority: Vec<AuthorityChunk>,
}

fn default_document() -> String {
    DEFAULT_DOCUMENT.to_string()
}

impl DocumentInput {
    pub fn new(document: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            full_text: full_text.into(),
            ..Self::default()
        }
    }

    pub fn with_clauses(mut self, clauses: Vec<Clause>) -> Self {
        self.clauses = clauses;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_authority(mut self, authority: Vec<AuthorityChunk>) -> Self {
        self.authority = authority;
        self
    }
}

/// Aggregate verdict for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub document: String,
    pub findings: Vec<Finding>,
    pub compliance_results: Vec<ComplianceResult>,
    pub compliance_summary: ComplianceSummary,
    /// At least one finding is HIGH or CRITICAL.
    pub is_red_flag: bool,
    pub has_any_flags: bool,
    /// No CRITICAL or HIGH mandatory clause is missing.
    pub is_compliant: bool,
    /// Default "answer normally" behaviour must give way to flagging.
    pub override_answer: bool,
    /// False when the document text was empty and no clause was checked.
    pub compliance_evaluated: bool,
}

impl Decision {
    pub fn strategy(&self) -> ExplanationStrategy {
        ExplanationStrategy::for_decision(self)
    }
}

/// Evaluates documents against a shared rulebook.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rulebook: Arc<Rulebook>,
    config: EngineConfig,
}

impl DecisionEngine {
    pub fn new(rulebook: Arc<Rulebook>, config: EngineConfig) -> Self {
        Self { rulebook, config }
    }

    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, input: &DocumentInput) -> Decision {
        let config = &self.config;
        let detector = RedFlagDetector::new(&self.rulebook, config.authority_preview_chars);

        let compliance_results = ComplianceVerifier::new(&self.rulebook).verify(&input.full_text);
        let compliance_summary = summarize_compliance(&compliance_results);
        let compliance_evaluated = !input.full_text.trim().is_empty();

        let excerpts = detector.prepare_authority(&input.authority);
        let mut raised = Vec::new();
        for clause in self.sections(input) {
            if clause.text.trim().is_empty() {
                continue;
            }
            let source = ClauseSource {
                document: input.document.clone(),
                section: clause.section.clone(),
                excerpt: excerpt(&clause.text, config.clause_excerpt_chars).to_string(),
            };
            let findings = detector.detect_prepared(
                &clause.text,
                &excerpts,
                config.require_authority_support,
            );
            debug!(section = %clause.section, findings = findings.len(), "clause evaluated");
            raised.extend(findings.into_iter().map(|f| with_source(f, &source)));
        }

        if let Some(query) = input.query.as_deref() {
            let source = ClauseSource {
                document: USER_QUERY_DOCUMENT.to_string(),
                section: String::new(),
                excerpt: excerpt(query, config.clause_excerpt_chars).to_string(),
            };
            let findings =
                detector.detect_prepared(query, &excerpts, config.require_authority_support);
            raised.extend(findings.into_iter().map(|f| with_source(f, &source)));
        }

        let findings = dedup_findings(raised, config.dedup_prefix_chars);
        let is_red_flag = findings.iter().any(|f| f.severity.is_red_flag());
        let is_compliant = compliance_summary.is_compliant;

        info!(
            document = %input.document,
            findings = findings.len(),
            red_flag = is_red_flag,
            compliant = is_compliant,
            missing = compliance_summary.missing_count,
            "decision summarized"
        );

        Decision {
            document: input.document.clone(),
            has_any_flags: !findings.is_empty(),
            findings,
            compliance_results,
            compliance_summary,
            is_red_flag,
            is_compliant,
            override_answer: is_red_flag,
            compliance_evaluated,
        }
    }

    /// Clauses as supplied, or word windows of the full text when none were.
    fn sections(&self, input: &DocumentInput) -> Vec<Clause> {
        let clauses: Vec<Clause> = if input.clauses.is_empty() {
            chunk_words(
                &input.full_text,
                self.config.chunk_words,
                self.config.chunk_overlap,
            )
            .into_iter()
            .map(|text| Clause::new(String::new(), text))
            .collect()
        } else {
            input.clauses.clone()
        };

        clauses
            .into_iter()
            .enumerate()
            .map(|(idx, mut clause)| {
                if clause.section.trim().is_empty() {
                    clause.section = format!("Section {}", idx + 1);
                }
                clause
            })
            .collect()
    }
}

fn with_source(mut finding: Finding, source: &ClauseSource) -> Finding {
    finding.clause_source = Some(source.clone());
    finding
}

/// Keep the first finding for each (rule id, excerpt prefix) key.
pub fn dedup_findings(findings: Vec<Finding>, prefix_chars: usize) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|f| seen.insert(f.dedup_key(prefix_chars)))
        .collect()
}
