//! Document-level mandatory clause verification.

use clauseguard_core::{
    ComplianceResult, ComplianceStatus, ComplianceSummary, Importance, Rulebook, normalize_text,
};
use tracing::debug;

/// Checks a whole document against every presence rule.
pub struct ComplianceVerifier<'r> {
    rulebook: &'r Rulebook,
}

impl<'r> ComplianceVerifier<'r> {
    pub fn new(rulebook: &'r Rulebook) -> Self {
        Self { rulebook }
    }

    /// One result per presence rule, in rulebook order.
    ///
    /// A rule is COMPLIANT when any of its required patterns matches the
    /// normalised document; the first match in declaration order is
    /// reported. An empty document yields no results at all.
    pub fn verify(&self, document_text: &str) -> Vec<ComplianceResult> {
        let text = normalize_text(document_text);
        if text.is_empty() {
            return Vec::new();
        }

        self.rulebook
            .presence_rules()
            .iter()
            .map(|rule| {
                let matched = rule.required_patterns.first_match(&text);
                let status = match matched {
                    Some(_) => ComplianceStatus::Compliant,
                    None => ComplianceStatus::Missing,
                };
                debug!(rule_id = %rule.id, status = status.as_str(), "presence rule checked");
                ComplianceResult {
                    rule_id: rule.id.clone(),
                    domain: rule.domain,
                    importance: rule.importance,
                    description: rule.description.clone(),
                    status,
                    matched_pattern: matched.map(|p| p.as_str().to_string()),
                }
            })
            .collect()
    }
}

/// Partition results by status and importance.
///
/// A document is compliant when nothing CRITICAL or HIGH is missing;
/// missing MEDIUM clauses are reported but never block.
pub fn summarize_compliance(results: &[ComplianceResult]) -> ComplianceSummary {
    let mut summary = ComplianceSummary {
        total_checks: results.len(),
        ..ComplianceSummary::default()
    };

    for result in results {
        if !result.is_missing() {
            summary.compliant_count += 1;
            continue;
        }
        summary.missing_count += 1;
        let bucket = match result.importance {
            Importance::Critical => &mut summary.critical_missing,
            Importance::High => &mut summary.high_missing,
            Importance::Medium => &mut summary.medium_missing,
        };
        bucket.push(result.clone());
    }

    summary.is_compliant = summary.critical_missing.is_empty() && summary.high_missing.is_empty();
    summary
}
