//! Ranked risk levels for violation rules and presence rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a triggered violation rule.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Low < Medium < High < Critical`. The ordering is only used for
/// escalation and demotion, never for display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// One rank lower for uncorroborated findings.
    ///
    /// CRITICAL→HIGH and HIGH→MEDIUM; MEDIUM and LOW are left unchanged.
    pub fn demoted(self) -> Self {
        match self {
            Self::Critical => Self::High,
            Self::High => Self::Medium,
            other => other,
        }
    }

    /// HIGH and CRITICAL findings make a decision a red flag.
    pub fn is_red_flag(&self) -> bool {
        *self >= Self::High
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Importance of a mandatory clause checked by a presence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Importance {
    Medium,
    High,
    Critical,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// A missing clause of this importance makes the document non-compliant.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        let mut shuffled = vec![
            Severity::High,
            Severity::Low,
            Severity::Critical,
            Severity::Medium,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                Severity::Low,
                Severity::Medium,
                Severity::High,
                Severity::Critical
            ]
        );
    }

    #[test]
    fn demotion_is_one_rank_and_floors_at_medium() {
        assert_eq!(Severity::Critical.demoted(), Severity::High);
        assert_eq!(Severity::High.demoted(), Severity::Medium);
        assert_eq!(Severity::Medium.demoted(), Severity::Medium);
        assert_eq!(Severity::Low.demoted(), Severity::Low);
    }

    #[test]
    fn red_flag_threshold() {
        assert!(Severity::Critical.is_red_flag());
        assert!(Severity::High.is_red_flag());
        assert!(!Severity::Medium.is_red_flag());
        assert!(!Severity::Low.is_red_flag());
    }

    #[test]
    fn serde_uses_upper_case_names() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"CRITICAL\"");
        let imp: Importance = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(imp, Importance::High);
        assert!(serde_json::from_str::<Importance>("\"LOW\"").is_err());
    }

    #[test]
    fn blocking_importance() {
        assert!(Importance::Critical.is_blocking());
        assert!(Importance::High.is_blocking());
        assert!(!Importance::Medium.is_blocking());
    }
}
