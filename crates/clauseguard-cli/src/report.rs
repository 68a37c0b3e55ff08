//! JSON report envelope for `evaluate --json`.

use chrono::{DateTime, Utc};
use clauseguard_engine::{Decision, NarrativeBrief};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub rulebook_version: &'a str,
    pub generated_at: DateTime<Utc>,
    pub decision: &'a Decision,
    pub brief: &'a NarrativeBrief,
}

impl<'a> Report<'a> {
    pub fn new(
        rulebook_version: &'a str,
        decision: &'a Decision,
        brief: &'a NarrativeBrief,
    ) -> Self {
        Self {
            rulebook_version,
            generated_at: Utc::now(),
            decision,
            brief,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use clauseguard_core::{EngineConfig, Rulebook};
    use clauseguard_engine::{DecisionEngine, DocumentInput};

    #[test]
    fn envelope_fields() {
        let engine = DecisionEngine::new(
            Arc::new(Rulebook::builtin().unwrap()),
            EngineConfig::default(),
        );
        let decision = engine.evaluate(&DocumentInput::new(
            "agreement.pdf",
            "Disputes shall be subject to arbitration only.",
        ));
        let brief = NarrativeBrief::build(&decision, "", "", engine.config());
        let report = Report::new(engine.rulebook().version(), &decision, &brief);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rulebook_version"], "2024.1");
        assert!(json["generated_at"].is_string());
        assert_eq!(json["decision"]["is_red_flag"], true);
        assert_eq!(json["brief"]["strategy"], "explain_non_compliance");
        assert_eq!(
            json["decision"]["findings"][0]["rule_id"],
            "RF-JURISDICTION-001"
        );
    }
}
