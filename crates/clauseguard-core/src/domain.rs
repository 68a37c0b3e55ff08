//! Category tags for rulebook entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Regulatory domain a rule belongs to.
///
/// Closed set: a rulebook naming any other domain fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Refund,
    Interest,
    Possession,
    Jurisdiction,
    Unilateral,
    Disclosures,
    Payment,
    CarpetArea,
    Specifications,
    Registration,
    Penalty,
    Title,
    CommonAreas,
    Cancellation,
    DisputeResolution,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refund => "refund",
            Self::Interest => "interest",
            Self::Possession => "possession",
            Self::Jurisdiction => "jurisdiction",
            Self::Unilateral => "unilateral",
            Self::Disclosures => "disclosures",
            Self::Payment => "payment",
            Self::CarpetArea => "carpet_area",
            Self::Specifications => "specifications",
            Self::Registration => "registration",
            Self::Penalty => "penalty",
            Self::Title => "title",
            Self::CommonAreas => "common_areas",
            Self::Cancellation => "cancellation",
            Self::DisputeResolution => "dispute_resolution",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
