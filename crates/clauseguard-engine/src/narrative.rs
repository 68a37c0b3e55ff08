//! Explanation directive for the narrative-generation collaborator.
//!
//! Everything here is a pure function of a [`Decision`] plus the caller's
//! query and retrieved context.

use clauseguard_core::{ComplianceResult, ComplianceSummary, EngineConfig, Finding};
use serde::{Deserialize, Serialize};

use crate::aggregator::Decision;

const EXPLAIN_INSTRUCTION: &str =
    "Explain why the clause is non-compliant based on the red flags and authority excerpts.";

/// How the narrative collaborator should present a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationStrategy {
    /// HIGH or CRITICAL findings: explain why the clause is non-compliant.
    ExplainNonCompliance,
    /// Only LOW or MEDIUM findings: mention them as potential issues.
    MentionPotentialIssues,
    /// No findings: report missing mandatory clauses only.
    ReportComplianceGaps,
}

impl ExplanationStrategy {
    pub fn for_decision(decision: &Decision) -> Self {
        if decision.is_red_flag {
            Self::ExplainNonCompliance
        } else if decision.has_any_flags {
            Self::MentionPotentialIssues
        } else {
            Self::ReportComplianceGaps
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplainNonCompliance => "explain_non_compliance",
            Self::MentionPotentialIssues => "mention_potential_issues",
            Self::ReportComplianceGaps => "report_compliance_gaps",
        }
    }
}

impl std::fmt::Display for ExplanationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction and augmented context handed to the narrative collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBrief {
    pub strategy: ExplanationStrategy,
    pub instruction: String,
    pub context: String,
}

impl NarrativeBrief {
    pub fn build(
        decision: &Decision,
        query: &str,
        retrieved_context: &str,
        config: &EngineConfig,
    ) -> Self {
        let strategy = decision.strategy();
        let mut lines = vec![retrieved_context.to_string()];

        let instruction = match strategy {
            ExplanationStrategy::ExplainNonCompliance => {
                lines.push("\nTriggered Red Flags:".to_string());
                for f in &decision.findings {
                    lines.push(finding_line(f));
                    for sup in f.authority_support.iter().take(config.max_cited_support) {
                        lines.push(format!(
                            "  - {}: {}",
                            sup.source_id, sup.original_excerpt_preview
                        ));
                    }
                }
                lines.push(summary_line(&decision.compliance_summary));
                EXPLAIN_INSTRUCTION.to_string()
            }
            ExplanationStrategy::MentionPotentialIssues => {
                lines.push("\nPotential Issues (Low/Medium Severity):".to_string());
                lines.extend(decision.findings.iter().map(finding_line));
                lines.push(summary_line(&decision.compliance_summary));
                query.to_string()
            }
            ExplanationStrategy::ReportComplianceGaps => {
                let summary = &decision.compliance_summary;
                lines.push(format!(
                    "\n[Compliance Check Result for {}]",
                    decision.document
                ));
                lines.push(format!(
                    "Required Clauses: {}/{} found",
                    summary.compliant_count, summary.total_checks
                ));
                if !summary.critical_missing.is_empty() {
                    lines.push(format!(
                        "CRITICAL Missing: {}",
                        descriptions(&summary.critical_missing)
                    ));
                }
                if !summary.high_missing.is_empty() {
                    lines.push(format!(
                        "HIGH Priority Missing: {}",
                        descriptions(&summary.high_missing)
                    ));
                }
                lines.push("Red Flags: None detected".to_string());
                query.to_string()
            }
        };

        Self {
            strategy,
            instruction,
            context: lines.join("\n"),
        }
    }
}

fn finding_line(f: &Finding) -> String {
    format!("- [{}] {} ({}): {}", f.severity, f.rule_id, f.domain, f.reason)
}

fn summary_line(summary: &ComplianceSummary) -> String {
    format!(
        "\nCompliance Summary: {}/{} required clauses found",
        summary.compliant_count, summary.total_checks
    )
}

fn descriptions(results: &[ComplianceResult]) -> String {
    results
        .iter()
        .map(|r| r.description.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::aggregator::{Clause, DecisionEngine, DocumentInput};
    use clauseguard_core::{AuthorityChunk, Rulebook};

    const REFUND_CLAUSE: &str = "The deposit is non-refundable and buyer waives refund.";

    fn evaluate(input: DocumentInput) -> Decision {
        DecisionEngine::new(
            Arc::new(Rulebook::builtin().unwrap()),
            EngineConfig::default(),
        )
        .evaluate(&input)
    }

    #[test]
    fn red_flags_are_explained_with_citations() {
        let authority = (0..5)
            .map(|i| {
                AuthorityChunk::new("Refund with interest under Section 18.", format!("act-{i}.pdf"))
            })
            .collect();
        let decision = evaluate(
            DocumentInput::new("agreement.pdf", REFUND_CLAUSE).with_authority(authority),
        );
        let config = EngineConfig::default();
        let brief = NarrativeBrief::build(&decision, "is this ok?", "CTX", &config);

        assert_eq!(brief.strategy, ExplanationStrategy::ExplainNonCompliance);
        assert_eq!(brief.instruction, EXPLAIN_INSTRUCTION);
        assert!(brief.context.starts_with("CTX\n\nTriggered Red Flags:\n"));
        assert!(
            brief.context.contains(
                "- [HIGH] RF-REFUND-001 (refund): Clause waives or denies statutory refund rights contrary to authority."
            ),
            "context: {}",
            brief.context
        );
        assert_eq!(brief.context.matches("  - act-").count(), 3);
        assert!(brief.context.contains("  - act-0.pdf: Refund with interest under Section 18."));
        assert!(brief.context.ends_with("required clauses found"));
    }

    #[test]
    fn low_severity_findings_are_potential_issues() {
        let decision = evaluate(DocumentInput::new("agreement.pdf", REFUND_CLAUSE));
        let brief = NarrativeBrief::build(&decision, "summarise", "", &EngineConfig::default());

        assert_eq!(brief.strategy, ExplanationStrategy::MentionPotentialIssues);
        assert_eq!(brief.instruction, "summarise");
        assert!(brief.context.contains("Potential Issues (Low/Medium Severity):"));
        assert!(brief.context.contains("- [MEDIUM] RF-REFUND-001 (refund):"));
        assert!(brief.context.contains("Compliance Summary: 0/10 required clauses found"));
    }

    #[test]
    fn clean_document_reports_gaps() {
        let decision = evaluate(
            DocumentInput::new("agreement.pdf", "x").with_clauses(vec![Clause::new(
                "Recitals",
                "This agreement does not mention possession date or carpet area.",
            )]),
        );
        let config = EngineConfig::default();
        let brief = NarrativeBrief::build(&decision, "what is missing?", "CTX", &config);

        assert_eq!(brief.strategy, ExplanationStrategy::ReportComplianceGaps);
        assert_eq!(brief.instruction, "what is missing?");
        let lines: Vec<&str> = brief.context.lines().collect();
        assert_eq!(lines[0], "CTX");
        assert_eq!(lines[2], "[Compliance Check Result for agreement.pdf]");
        assert_eq!(lines[3], "Required Clauses: 0/10 found");
        assert_eq!(
            lines[4],
            "CRITICAL Missing: Agreement must mention RERA/MahaRERA registration number"
        );
        assert!(
            lines[5].starts_with("HIGH Priority Missing: Agreement must clearly specify carpet area"),
            "line: {}",
            lines[5]
        );
        assert_eq!(lines.last(), Some(&"Red Flags: None detected"));
    }

    #[test]
    fn brief_is_reproducible_from_the_decision() {
        let decision = evaluate(DocumentInput::new("agreement.pdf", REFUND_CLAUSE));
        let config = EngineConfig::default();
        let first = NarrativeBrief::build(&decision, "q", "c", &config);

        let json = serde_json::to_string(&decision).unwrap();
        let restored: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(NarrativeBrief::build(&restored, "q", "c", &config), first);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(
            serde_json::to_string(&ExplanationStrategy::ReportComplianceGaps).unwrap(),
            "\"report_compliance_gaps\""
        );
        assert_eq!(
            ExplanationStrategy::ExplainNonCompliance.to_string(),
            "explain_non_compliance"
        );
    }
}
