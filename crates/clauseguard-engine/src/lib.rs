//! ClauseGuard decision engine: red-flag detection, mandatory clause
//! verification and per-document decision aggregation over a compiled
//! [`Rulebook`].

pub mod aggregator;
pub mod detector;
pub mod narrative;
pub mod trigger;
pub mod verifier;

pub use aggregator::{Clause, Decision, DecisionEngine, DocumentInput, dedup_findings};
pub use detector::{RedFlagDetector, escalated_severity};
pub use narrative::{ExplanationStrategy, NarrativeBrief};
pub use trigger::{is_compliance_query, should_evaluate};
pub use verifier::{ComplianceVerifier, summarize_compliance};

use clauseguard_core::{AuthorityChunk, ComplianceResult, EngineConfig, Finding, Rulebook};

/// Findings for one clause against retrieved authority text.
///
/// Findings from this entry point carry no clause source.
pub fn detect_red_flags(
    rulebook: &Rulebook,
    clause_text: &str,
    authority: &[AuthorityChunk],
    require_authority_support: bool,
) -> Vec<Finding> {
    let preview_chars = EngineConfig::default().authority_preview_chars;
    RedFlagDetector::new(rulebook, preview_chars).detect(
        clause_text,
        authority,
        require_authority_support,
    )
}

/// One result per presence rule for a full document.
pub fn check_compliance(rulebook: &Rulebook, document_text: &str) -> Vec<ComplianceResult> {
    ComplianceVerifier::new(rulebook).verify(document_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clauseguard_core::Severity;

    #[test]
    fn entry_points_share_one_rulebook() {
        let rb = Rulebook::builtin().unwrap();
        let clause = "The deposit is non-refundable and buyer waives refund.";

        let findings = detect_red_flags(&rb, clause, &[], false);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].clause_source.is_none());
        assert!(detect_red_flags(&rb, clause, &[], true).is_empty());

        let results = check_compliance(
            &rb,
            "This agreement does not mention possession date or carpet area.",
        );
        let summary = summarize_compliance(&results);
        assert_eq!(summary.total_checks, 10);
        assert!(!summary.is_compliant);
        assert!(check_compliance(&rb, "").is_empty());
    }
}
