//! Compiled pattern sets evaluated against normalised text.

use regex::{Regex, RegexBuilder};

use crate::RulebookError;

/// One regular expression with the source string it was compiled from.
///
/// The source string is what findings report as a "matched pattern".
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` case-insensitively.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered set of distinct patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile every source in order.
    ///
    /// `rule_id` and `set` only label errors. An empty set, a repeated source,
    /// or an invalid expression is rejected.
    pub fn compile(
        rule_id: &str,
        set: &'static str,
        sources: &[String],
    ) -> Result<Self, RulebookError> {
        if sources.is_empty() {
            return Err(RulebookError::EmptyPatternSet {
                rule_id: rule_id.to_string(),
                set,
            });
        }

        let mut patterns: Vec<Pattern> = Vec::with_capacity(sources.len());
        for source in sources {
            if patterns.iter().any(|p| p.source == *source) {
                return Err(RulebookError::DuplicatePattern {
                    rule_id: rule_id.to_string(),
                    set,
                    pattern: source.clone(),
                });
            }
            let pattern =
                Pattern::compile(source).map_err(|source_err| RulebookError::InvalidPattern {
                    rule_id: rule_id.to_string(),
                    pattern: source.clone(),
                    source: source_err,
                })?;
            patterns.push(pattern);
        }

        Ok(Self { patterns })
    }

    /// Every pattern that matches anywhere in `text`, in declaration order.
    ///
    /// Each pattern is evaluated exactly once. No match yields an empty vector.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a Pattern> {
        self.patterns.iter().filter(|p| p.is_match(text)).collect()
    }

    /// The first pattern in declaration order that matches `text`.
    pub fn first_match(&self, text: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.is_match(text))
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Source strings in declaration order.
    pub fn sources(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.source.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
