//! Human-readable cards for findings, compliance results and decisions.

use clauseguard_core::{ComplianceResult, ComplianceSummary, Finding, Rulebook};
use clauseguard_engine::{Decision, NarrativeBrief};

const MAX_PATTERNS: usize = 5;

// ── Rulebook ──

pub fn print_rules(rulebook: &Rulebook) {
    println!("=== Rulebook {} ===", rulebook.version());
    println!();

    println!("Violation rules");
    for rule in rulebook.violation_rules() {
        println!(
            "  {:<26} {:<10} {}",
            rule.id,
            rule.base_severity.as_str(),
            rule.domain
        );
    }
    println!();

    println!("Presence rules");
    for rule in rulebook.presence_rules() {
        println!(
            "  {:<26} {:<10} {}",
            rule.id,
            rule.importance.as_str(),
            rule.domain
        );
    }
    println!();

    println!(
        "Implicit authority phrases: {}",
        rulebook.implicit_intent().len()
    );
}

// ── Findings ──

pub fn print_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("No red flags detected.");
        return;
    }
    for f in findings {
        print_finding_card(f);
    }
}

pub fn print_finding_card(f: &Finding) {
    println!("=== {} [{}] ===", f.rule_id, f.severity);
    println!("{}", f.reason);
    println!();

    println!("  {:<26} {}", "domain", f.domain);
    println!("  {:<26} {}", "authority_support", f.has_authority_support);
    if let Some(src) = &f.clause_source {
        println!("  {:<26} {}", "document", src.document);
        if !src.section.is_empty() {
            println!("  {:<26} {}", "section", src.section);
        }
        println!("  {:<26} {}", "excerpt", src.excerpt);
    }
    print_list("violation_patterns", &f.matched_violation_patterns);
    print_list("authority_patterns", &f.matched_authority_patterns);

    for sup in &f.authority_support {
        println!("  {:<26} {}", sup.source_id, sup.original_excerpt_preview);
    }
    println!();
}

fn print_list(label: &str, items: &[String]) {
    let shown: Vec<&str> = items.iter().take(MAX_PATTERNS).map(String::as_str).collect();
    let more = items.len().saturating_sub(MAX_PATTERNS);
    if more > 0 {
        println!("  {:<26} {} (+{more} more)", label, shown.join(", "));
    } else {
        println!("  {:<26} {}", label, shown.join(", "));
    }
}

// ── Compliance ──

pub fn print_compliance(results: &[ComplianceResult], summary: &ComplianceSummary) {
    if results.is_empty() {
        println!("No document text to check.");
        return;
    }

    println!("Mandatory clauses");
    for r in results {
        println!(
            "  {:<26} {:<10} {:<10} {}",
            r.rule_id,
            r.importance.as_str(),
            r.status.as_str(),
            r.description
        );
    }
    println!();

    println!("Summary");
    println!(
        "  {:<26} {}/{}",
        "found", summary.compliant_count, summary.total_checks
    );
    println!("  {:<26} {}", "critical_missing", summary.critical_missing.len());
    println!("  {:<26} {}", "high_missing", summary.high_missing.len());
    println!("  {:<26} {}", "medium_missing", summary.medium_missing.len());
    println!("  {:<26} {}", "compliant", summary.is_compliant);
}

// ── Decision ──

pub fn print_decision(decision: &Decision, brief: &NarrativeBrief) {
    println!("=== {} ===", decision.document);
    println!("  {:<26} {}", "red_flag", decision.is_red_flag);
    println!("  {:<26} {}", "any_flags", decision.has_any_flags);
    println!("  {:<26} {}", "compliant", decision.is_compliant);
    println!("  {:<26} {}", "compliance_evaluated", decision.compliance_evaluated);
    println!("  {:<26} {}", "strategy", brief.strategy);
    println!();

    print_findings(&decision.findings);
    println!();
    print_compliance(&decision.compliance_results, &decision.compliance_summary);
    println!();

    println!("Instruction");
    println!("  {}", brief.instruction);
    println!();
    println!("Context");
    for line in brief.context.lines() {
        println!("  {line}");
    }
}
