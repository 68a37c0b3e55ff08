//! Built-in real-estate agreement rulebook.
//!
//! Rule identifiers are persisted by downstream consumers and must never be
//! renumbered. Declaration order matters: the detector evaluates violation
//! rules in this order and may stop early.
//!
//! Patterns are written against normalised (lower-case, single-spaced) text.

use crate::rulebook::{PresenceRuleSpec, RulebookSpec, ViolationRuleSpec};
use crate::{Domain, Importance, Severity};

const VERSION: &str = "2024.1";

struct ViolationDef {
    id: &'static str,
    domain: Domain,
    severity: Severity,
    rationale: &'static str,
    violation: &'static [&'static str],
    authority: &'static [&'static str],
}

struct PresenceDef {
    id: &'static str,
    domain: Domain,
    importance: Importance,
    description: &'static str,
    required: &'static [&'static str],
}

// ── Implicit authority intent ──

const IMPLICIT_AUTHORITY_PHRASES: &[&str] = &[
    r"\bshall\s+be\s+entitled\b",
    r"\bstatutory\s+(right|obligation|provision)\b",
    r"\bmandatory\s+(provision|requirement|disclosure)\b",
    r"\bshall\s+not\s+waive\b",
    r"\bas\s+per\s+(the\s+)?(act|rules|regulations)\b",
    r"\bin\s+accordance\s+with\s+(the\s+)?(act|rules)\b",
];

// ── Violation rules (red flags) ──

const VIOLATION_RULES: &[ViolationDef] = &[
    ViolationDef {
        id: "RF-REFUND-001",
        domain: Domain::Refund,
        severity: Severity::High,
        rationale: "Clause waives or denies statutory refund rights contrary to authority.",
        violation: &[
            r"\bno\s+refund\b",
            r"\bnon[-\s]?refundable\b",
            r"\brefund\s+shall\s+not\s+be\s+payable\b",
            r"\bbuyer\s+waives\s+refund\b",
            r"\bcancellation\s+shall\s+not\s+entitle\s+refund\b",
            r"\bforfeit(ure|ed)?\s+(of\s+)?(amount|deposit|payment)\b",
            r"\bearnest\s+money\s+(shall\s+be\s+)?forfeit",
            r"\bdeposit\s+(is|shall\s+be)\s+non[-\s]?refundable\b",
        ],
        authority: &[
            r"\bentitled\s+to\s+refund\b",
            r"\brefund\s+(along\s+)?with\s+interest\b",
            r"\breturn\s+(of\s+)?(the\s+)?amount\b",
            r"\bsection\s+18\b",
        ],
    },
    ViolationDef {
        id: "RF-INTEREST-001",
        domain: Domain::Interest,
        severity: Severity::High,
        rationale: "Clause removes or limits statutory interest payable to the allottee.",
        violation: &[
            r"\bno\s+interest\b",
            r"\bwithout\s+interest\b",
            r"\binterest\s+shall\s+not\s+be\s+payable\b",
            r"\binterest\s+capped\s+at\s+\d+(\.\d+)?\s*%",
            r"\binterest\s+(is\s+)?(waived|excluded)\b",
            r"\bexcluding\s+interest\b",
        ],
        authority: &[
            r"\binterest\s+(shall\s+be\s+)?payable\b",
            r"\bstatutory\s+interest\b",
            r"\binterest\s+as\s+prescribed\b",
            r"\bsbi\s+(prime\s+)?lending\s+rate\b",
            r"\bsection\s+18\b",
        ],
    },
    ViolationDef {
        id: "RF-POSSESSION-001",
        domain: Domain::Possession,
        severity: Severity::High,
        rationale: "Clause gives indefinite extension or denies liability for delay in possession.",
        violation: &[
            r"\bno\s+liability\s+for\s+delay\b",
            r"\b(sole|absolute)\s+discretion\s+(to\s+)?extend\b",
            r"\btime\s+is\s+not\s+of\s+the\s+essence\b",
            r"\bindefinite\s+extension\b",
            r"\bforce\s+majeure\b.*\b(indefinite|unlimited)\b",
            r"\bpossession\s+(date\s+)?(is\s+)?(tentative|approximate|estimated)\b",
            r"\bno\s+claim\s+(for|on\s+account\s+of)\s+delay\b",
        ],
        authority: &[
            r"\bpossession\s+within\s+(the\s+)?stipulated\s+period\b",
            r"\bliability\s+for\s+delay\b",
            r"\bcompensation\s+for\s+delay\b",
            r"\btimely\s+delivery\b",
            r"\bsection\s+18\b",
        ],
    },
    ViolationDef {
        id: "RF-JURISDICTION-001",
        domain: Domain::Jurisdiction,
        severity: Severity::Critical,
        rationale: "Clause ousts statutory forum/jurisdiction or restricts recourse to authority.",
        violation: &[
            r"\bexclusive\s+jurisdiction\b",
            r"\bjurisdiction\s+of\s+\w+\s+courts?\s+only\b",
            r"\barbitration\s+(only\s+)?by\s+(the\s+)?promoter\b",
            r"\ballottee\s+waives\s+(the\s+)?right\s+to\s+approach\b",
            r"\bshall\s+not\s+(approach|file|complain)\b",
            r"\bdisputes?\s+(shall\s+be\s+)?(subject\s+to\s+)?arbitration\s+only\b",
            r"\bcivil\s+court\s+(of\s+)?\w+\s+(shall\s+have\s+)?jurisdiction\b",
        ],
        authority: &[
            r"\bjurisdiction\s+of\s+(the\s+)?(authority|tribunal|rera|maharera)\b",
            r"\bright\s+to\s+approach\s+(the\s+)?(authority|tribunal|regulatory|rera)\b",
            r"\bmay\s+(approach|file|complain)\s+(before\s+)?(the\s+)?(authority|tribunal)\b",
            r"\brera\s+(authority|tribunal)\b",
            r"\breal\s+estate\s+regulatory\s+authority\b",
        ],
    },
    ViolationDef {
        id: "RF-UNILATERAL-001",
        domain: Domain::Unilateral,
        severity: Severity::High,
        rationale: "Clause grants unilateral discretion to promoter affecting rights/obligations.",
        violation: &[
            r"\b(sole|absolute|exclusive)\s+discretion\s+(of\s+)?(the\s+)?promoter\b",
            r"\bpromoter\s+(may|can|shall)\s+change\s+(the\s+)?(area|specifications?|price|layout)\b",
            r"\bpromoter\s+reserves\s+the\s+right\s+to\s+(cancel|modify|alter|change)\b",
            r"\bwithout\s+(prior\s+)?(written\s+)?consent\s+(of\s+)?(the\s+)?(allottee|buyer|purchaser)\b",
            r"\bunilateral(ly)?\s+(change|modify|alter|cancel)\b",
            r"\bpromoter\s+shall\s+have\s+(the\s+)?(right|liberty|freedom)\s+to\b",
        ],
        authority: &[
            r"\bshall\s+(not\s+)?alter\b",
            r"\b(prior|written)\s+consent\b",
            r"\bwith\s+(the\s+)?consent\s+of\s+(the\s+)?(allottee|buyer)\b",
            r"\bsection\s+14\b",
        ],
    },
    ViolationDef {
        id: "RF-DISCLOSURE-001",
        domain: Domain::Disclosures,
        severity: Severity::Medium,
        rationale: "Clause denies mandatory disclosures or information to the allottee.",
        violation: &[
            r"\bno\s+obligation\s+to\s+disclose\b",
            r"\bpromoter\s+is\s+not\s+required\s+to\s+(share|provide|disclose)\b",
            r"\bdocuments?\s+(will|shall)\s+not\s+be\s+provided\b",
            r"\bconfidential\s+(and\s+)?proprietary\b.*\b(not\s+share|not\s+disclose)\b",
        ],
        authority: &[
            r"\bmandatory\s+disclosure\b",
            r"\bshall\s+disclose\b",
            r"\bprovide\s+information\b",
            r"\bsection\s+4\b",
            r"\bsection\s+11\b",
        ],
    },
    ViolationDef {
        id: "RF-PAYMENT-001",
        domain: Domain::Payment,
        severity: Severity::High,
        rationale: "Clause demands payment before execution of agreement or registration.",
        violation: &[
            r"\bpayment\s+(of\s+)?\d+\s*%\s+(before|prior\s+to)\s+(registration|agreement)\b",
            r"\badvance\s+payment\s+(exceeding|more\s+than)\s+10\s*%",
            r"\bdemand\s+(of\s+)?payment\s+without\s+(an\s+)?agreement\b",
        ],
        authority: &[
            r"\bnot\s+accept\s+(a\s+sum\s+)?(more\s+than\s+)?10\s*%",
            r"\bafter\s+execution\s+of\s+(the\s+)?agreement\b",
            r"\bsection\s+13\b",
        ],
    },
    ViolationDef {
        id: "RF-AREA-001",
        domain: Domain::CarpetArea,
        severity: Severity::High,
        rationale: "Clause uses super built-up area instead of carpet area for pricing.",
        violation: &[
            r"\bsuper\s+built[-\s]?up\s+area\b",
            r"\bsaleable\s+area\b",
            r"\bbuilt[-\s]?up\s+area\s+(for\s+)?(pricing|calculation|rate)\b",
            r"\bprice\s+(per|based\s+on)\s+(super\s+)?built[-\s]?up\b",
        ],
        authority: &[
            r"\bcarpet\s+area\b",
            r"\bsection\s+2\s*\(\s*k\s*\)",
            r"\bsold\s+on\s+carpet\s+area\b",
        ],
    },
    ViolationDef {
        id: "RF-SPEC-001",
        domain: Domain::Specifications,
        severity: Severity::Medium,
        rationale: "Agreement lacks mandatory specifications required under Section 13(2).",
        violation: &[
            r"\bspecifications?\s+(are\s+)?not\s+(provided|mentioned|detailed)\b",
            r"\bsubject\s+to\s+change\s+without\s+(any\s+)?notice\b",
            r"\bas\s+per\s+(the\s+)?(promoter|builder)['’]?s?\s+(sole\s+)?discretion\b",
        ],
        authority: &[
            r"\bshall\s+specify\b",
            r"\bagreement\s+(shall|must)\s+(contain|include)\b",
            r"\bsection\s+13\s*\(\s*2\s*\)",
            r"\bmandatory\s+particulars\b",
        ],
    },
];

// ── Presence rules (mandatory clauses) ──

const PRESENCE_RULES: &[PresenceDef] = &[
    PresenceDef {
        id: "CMP-RERA-REG-001",
        domain: Domain::Registration,
        importance: Importance::Critical,
        description: "Agreement must mention RERA/MahaRERA registration number",
        required: &[
            r"\b(maha)?rera\s+(project\s+)?(registration\s+)?(no|number|#)\.?\s*[:\-]?\s*[a-z]?\d+",
            r"\bregistration\s+(no|number)\.?\s*[:\-]?\s*p\d+",
            r"\bproject\s+registration\s+(number|no)\b",
        ],
    },
    PresenceDef {
        id: "CMP-CARPET-001",
        domain: Domain::CarpetArea,
        importance: Importance::High,
        description: "Agreement must clearly specify carpet area in sq. ft./sq. m.",
        required: &[
            r"\bcarpet\s+area\s*[:\-]?\s*\d+",
            r"\bcarpet\s+area\s+of\s+\d+",
            r"\bcarpet\s+area\s+(is|shall\s+be)\s+\d+",
            r"\b\d+(\.\d+)?\s*(sq\.?\s*ft|sq\.?\s*m|square\s*(feet|met(er|re)s?))",
        ],
    },
    PresenceDef {
        id: "CMP-POSSESSION-001",
        domain: Domain::Possession,
        importance: Importance::High,
        description: "Agreement must specify possession date or timeline",
        required: &[
            r"\bpossession\s+(on\s+or\s+before|on|by|within|before)\s+\S*\d",
            r"\bpossession\s+date\s*(is\s+|shall\s+be\s+|of\s+)?[:\-]?\s*\S*\d",
            r"\bhandover\s+date\s*(is\s+|shall\s+be\s+|of\s+)?[:\-]?\s*\S*\d",
            r"\bhandover\s+(by|within)\s+\S*\d",
            r"\bdelivery\s+date\s*(of\s+[a-z\s]{0,40}?)?(is\s+|shall\s+be\s+)?[:\-]?\s*\S*\d",
            r"\bdelivery\s+of\s+possession\s+(on\s+or\s+before|on|by|within)\b",
            r"\bpossession\s+shall\s+be\s+(given|handed|delivered)\b",
            r"\b(proposed|expected|tentative)\s+date\s+of\s+(completion|possession)\b",
        ],
    },
    PresenceDef {
        id: "CMP-PAYMENT-001",
        domain: Domain::Payment,
        importance: Importance::High,
        description: "Agreement must include payment schedule linked to construction",
        required: &[
            r"\bpayment\s+schedule\b",
            r"\binstall?ments?\s+(plan|schedule)\b",
            r"\bpayment\s+linked\s+to\s+(construction|progress)\b",
            r"\bstage[-\s]?wise\s+payment",
            r"\bmilestone[-\s]?based\s+payment",
            r"\bconstruction[-\s]?linked\s+payment",
        ],
    },
    PresenceDef {
        id: "CMP-PENALTY-001",
        domain: Domain::Penalty,
        importance: Importance::Medium,
        description: "Agreement should specify penalty/compensation for delays",
        required: &[
            r"\bpenalty\s+for\s+delay\b",
            r"\bcompensation\s+for\s+delay\b",
            r"\binterest\s+for\s+delay\b",
            r"\bdelay\s+(compensation|penalty|interest)\b",
            r"\bliable\s+to\s+pay\s+(interest|compensation|penalty)\b",
        ],
    },
    PresenceDef {
        id: "CMP-SPECIFICATION-001",
        domain: Domain::Specifications,
        importance: Importance::Medium,
        description: "Agreement should include specifications and amenities details",
        required: &[
            r"\bspecifications\s+(and\s+)?(amenities|fittings|fixtures)\b",
            r"\bschedule\s+of\s+specifications\b",
            r"\bannexure.{0,20}specifications\b",
            r"\bfittings\s+and\s+fixtures\b",
            r"\b(internal|external)\s+specifications\b",
        ],
    },
    PresenceDef {
        id: "CMP-TITLE-001",
        domain: Domain::Title,
        importance: Importance::High,
        description: "Agreement must contain title/ownership declaration",
        required: &[
            r"\bclear\s+(and\s+)?marketable\s+title\b",
            r"\btitle\s+(is\s+)?clear\s+and\s+free\b",
            r"\bfree\s+from\s+(all\s+)?encumbrances?\b",
            r"\btitle\s+deed\b",
            r"\bownership\s+(rights?|title)\b",
            r"\bno\s+encumbrance\b",
        ],
    },
    PresenceDef {
        id: "CMP-COMMON-AREA-001",
        domain: Domain::CommonAreas,
        importance: Importance::Medium,
        description: "Agreement should define common areas and facilities",
        required: &[
            r"\bcommon\s+areas?\s+(and\s+)?facilities\b",
            r"\bshared\s+(amenities|facilities)\b",
            r"\bundivided\s+(share|interest)\b",
            r"\bproportionate\s+share\b",
            r"\bcommon\s+area\s+maintenance\b",
        ],
    },
    PresenceDef {
        id: "CMP-CANCELLATION-001",
        domain: Domain::Cancellation,
        importance: Importance::High,
        description: "Agreement must include cancellation/withdrawal clause",
        required: &[
            r"\bcancellation\s+(policy|clause|terms)\b",
            r"\bwithdrawal\s+(by\s+)?(the\s+)?(allottee|buyer|purchaser)\b",
            r"\btermination\s+of\s+(the\s+)?(agreement|contract)\b",
            r"\bright\s+to\s+(cancel|withdraw|terminate)\b",
            r"\brefund\s+on\s+cancellation\b",
        ],
    },
    PresenceDef {
        id: "CMP-DISPUTE-001",
        domain: Domain::DisputeResolution,
        importance: Importance::Medium,
        description: "Agreement should include dispute resolution mechanism",
        required: &[
            r"\bdispute\s+resolution\b",
            r"\barbitration\s+(clause|proceedings)\b",
            r"\brera\s+(authority|adjudicating)\b",
            r"\bappellate\s+tribunal\b",
            r"\bgrievance\s+redressal\b",
        ],
    },
];

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

pub(crate) fn spec() -> RulebookSpec {
    RulebookSpec {
        version: VERSION.to_string(),
        violation_rules: VIOLATION_RULES
            .iter()
            .map(|d| ViolationRuleSpec {
                id: d.id.to_string(),
                domain: d.domain,
                severity: d.severity,
                rationale: d.rationale.to_string(),
                violation_patterns: owned(d.violation),
                authority_patterns: owned(d.authority),
            })
            .collect(),
        presence_rules: PRESENCE_RULES
            .iter()
            .map(|d| PresenceRuleSpec {
                id: d.id.to_string(),
                domain: d.domain,
                importance: d.importance,
                description: d.description.to_string(),
                required_patterns: owned(d.required),
            })
            .collect(),
        implicit_authority_phrases: owned(IMPLICIT_AUTHORITY_PHRASES),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Rulebook, normalize_text};

    fn rulebook() -> Rulebook {
        Rulebook::builtin().unwrap()
    }

    fn violation_hits(rule_id: &str, text: &str) -> usize {
        let rb = rulebook();
        let rule = rb.violation_rule(rule_id).unwrap();
        rule.violation_patterns.matches(&normalize_text(text)).len()
    }

    fn presence_satisfied(rule_id: &str, text: &str) -> bool {
        let rb = rulebook();
        let rule = rb.presence_rule(rule_id).unwrap();
        rule.required_patterns.any_match(&normalize_text(text))
    }

    #[test]
    fn refund_waiver_patterns() {
        assert_eq!(
            violation_hits(
                "RF-REFUND-001",
                "The deposit is non-refundable and buyer waives refund."
            ),
            3
        );
        assert_eq!(violation_hits("RF-REFUND-001", "Refund with interest."), 0);
    }

    #[test]
    fn interest_cap_matches_before_following_words() {
        assert_eq!(
            violation_hits("RF-INTEREST-001", "Interest capped at 6% per annum."),
            1
        );
    }

    #[test]
    fn arbitration_only_is_jurisdiction_ouster() {
        assert_eq!(
            violation_hits(
                "RF-JURISDICTION-001",
                "Disputes shall be subject to arbitration only."
            ),
            1
        );
    }

    #[test]
    fn registration_number_detected() {
        assert!(presence_satisfied(
            "CMP-RERA-REG-001",
            "MahaRERA Registration No. P51800012345"
        ));
        assert!(presence_satisfied(
            "CMP-RERA-REG-001",
            "Registration Number: P52100004321"
        ));
        assert!(!presence_satisfied(
            "CMP-RERA-REG-001",
            "the RERA authority may be approached"
        ));
    }

    #[test]
    fn possession_mention_without_timeline_is_not_enough() {
        assert!(!presence_satisfied(
            "CMP-POSSESSION-001",
            "This agreement does not mention possession date or carpet area."
        ));
        assert!(presence_satisfied(
            "CMP-POSSESSION-001",
            "Possession on or before 31 December 2026."
        ));
        assert!(presence_satisfied(
            "CMP-POSSESSION-001",
            "Possession date: 31/12/2026"
        ));
        assert!(presence_satisfied(
            "CMP-POSSESSION-001",
            "Possession shall be handed over upon receipt of the occupation certificate."
        ));
    }

    #[test]
    fn delivery_and_handover_dates_satisfy_possession() {
        for text in [
            "Delivery date: 31 December 2026.",
            "The delivery date of the apartment is 31/12/2026.",
            "Handover date shall be 31 March 2027.",
            "Handover within 36 months of registration.",
        ] {
            assert!(presence_satisfied("CMP-POSSESSION-001", text), "{text:?}");
        }
        for text in [
            "The delivery date is to be decided.",
            "Handover date or carpet area are not mentioned.",
        ] {
            assert!(!presence_satisfied("CMP-POSSESSION-001", text), "{text:?}");
        }
    }

    #[test]
    fn carpet_area_requires_a_figure() {
        assert!(!presence_satisfied("CMP-CARPET-001", "carpet area."));
        assert!(presence_satisfied("CMP-CARPET-001", "Carpet area: 650 sq. ft."));
        assert!(presence_satisfied("CMP-CARPET-001", "admeasuring 60.4 sq. m"));
    }
}
