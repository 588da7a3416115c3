//! Clause segmentation and keyword tagging.
//!
//! Sentences are split on the literal `". "`. This is naive: abbreviations
//! such as "e.g. " and "Inc. " also split, and a trailing period on the final
//! sentence is kept.

use uuid::Uuid;

use crate::model::{Clause, ClauseCategory};

/// Fixed confidence reported by the clause extraction stage.
pub const EXTRACTION_CONFIDENCE: f32 = 0.89;

/// Section assigned when no key section matches.
pub const GENERAL_SECTION: &str = "General Terms";

const RISK_KEYWORDS: &[&str] = &[
    "liable",
    "liability",
    "responsibility",
    "terminate",
    "breach",
    "penalty",
    "damages",
    "lawsuit",
    "arbitration",
    "indemnify",
];

const DATA_USAGE_KEYWORDS: &[&str] = &[
    "collect",
    "store",
    "share",
    "process",
    "personal data",
    "information",
    "cookies",
];

const OBLIGATION_KEYWORDS: &[&str] = &[
    "must",
    "shall",
    "required",
    "agree",
    "consent",
    "responsible",
    "comply",
];

/// Segmentation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Clauses beyond this count are discarded, bounding analysis cost.
    pub max_clauses: usize,
    /// Units shorter than this many chars are skipped when set.
    pub min_clause_len: Option<usize>,
}

impl SegmenterConfig {
    /// Rule-based path: 20 clauses, no length filter.
    pub const STANDARD: Self = Self {
        max_clauses: 20,
        min_clause_len: None,
    };

    /// Alternate path: 15 clauses, units under 20 chars skipped.
    pub const COMPACT: Self = Self {
        max_clauses: 15,
        min_clause_len: Some(20),
    };
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Split text into tagged clauses.
pub fn segment(text: &str, key_sections: &[String], config: &SegmenterConfig) -> Vec<Clause> {
    text.split(". ")
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .filter(|unit| {
            config
                .min_clause_len
                .is_none_or(|min| unit.chars().count() >= min)
        })
        .take(config.max_clauses)
        .map(|unit| {
            let lower = unit.to_lowercase();
            Clause {
                id: Uuid::new_v4(),
                text: unit.to_string(),
                section: assign_section(&lower, key_sections),
                category: categorize(&lower),
            }
        })
        .collect()
}

/// First keyword set to match wins: risk, then data usage, then obligation.
pub fn categorize(lower: &str) -> ClauseCategory {
    let hit = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));
    if hit(RISK_KEYWORDS) {
        ClauseCategory::Risk
    } else if hit(DATA_USAGE_KEYWORDS) {
        ClauseCategory::DataUsage
    } else if hit(OBLIGATION_KEYWORDS) {
        ClauseCategory::Obligation
    } else {
        ClauseCategory::General
    }
}

/// The first section with any word present in the clause, else
/// [`GENERAL_SECTION`].
pub fn assign_section(lower: &str, key_sections: &[String]) -> String {
    key_sections
        .iter()
        .find(|section| {
            section
                .split_whitespace()
                .any(|word| lower.contains(&word.to_lowercase()))
        })
        .cloned()
        .unwrap_or_else(|| GENERAL_SECTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_period_space() {
        let clauses = segment(
            "We collect data. You must comply. Nothing else here.",
            &[],
            &SegmenterConfig::STANDARD,
        );
        let texts: Vec<&str> = clauses.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["We collect data", "You must comply", "Nothing else here."]);
    }

    #[test]
    fn abbreviations_split_naively() {
        let clauses = segment(
            "We share data with partners, e.g. advertisers.",
            &[],
            &SegmenterConfig::STANDARD,
        );
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].text, "We share data with partners, e.g");
    }

    #[test]
    fn category_priority_order() {
        // "terminate" (risk) wins over "must" (obligation) and "share" (data).
        assert_eq!(
            categorize("you must not share; we may terminate"),
            ClauseCategory::Risk
        );
        assert_eq!(categorize("we share it and you must agree"), ClauseCategory::DataUsage);
        assert_eq!(categorize("you must agree"), ClauseCategory::Obligation);
        assert_eq!(categorize("hello world"), ClauseCategory::General);
    }

    #[test]
    fn arbitration_is_risk() {
        assert_eq!(
            categorize("all disputes resolved through binding arbitration."),
            ClauseCategory::Risk
        );
    }

    #[test]
    fn section_first_word_match() {
        let s = sections(&["Data Collection", "Data Usage", "User Rights"]);
        assert_eq!(assign_section("we collect your data", &s), "Data Collection");
        assert_eq!(assign_section("the user may object", &s), "User Rights");
        assert_eq!(assign_section("nothing relevant", &s), GENERAL_SECTION);
    }

    #[test]
    fn empty_text_yields_no_clauses() {
        assert!(segment("", &[], &SegmenterConfig::STANDARD).is_empty());
    }

    #[test]
    fn caps_clause_count() {
        let text = (0..1500)
            .map(|i| format!("Sentence number {i} must be read"))
            .collect::<Vec<_>>()
            .join(". ");
        let clauses = segment(&text, &[], &SegmenterConfig::STANDARD);
        assert_eq!(clauses.len(), 20);
        let compact = segment(&text, &[], &SegmenterConfig::COMPACT);
        assert_eq!(compact.len(), 15);
    }

    #[test]
    fn compact_skips_short_units() {
        let clauses = segment(
            "Short one. This sentence is long enough to keep",
            &[],
            &SegmenterConfig::COMPACT,
        );
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, "This sentence is long enough to keep");

        let standard = segment(
            "Short one. This sentence is long enough to keep",
            &[],
            &SegmenterConfig::STANDARD,
        );
        assert_eq!(standard.len(), 2);
    }

    #[test]
    fn clause_ids_are_unique() {
        let clauses = segment("a b. a b. a b", &[], &SegmenterConfig::STANDARD);
        assert_eq!(clauses.len(), 3);
        assert_ne!(clauses[0].id, clauses[1].id);
        assert_ne!(clauses[1].id, clauses[2].id);
    }
}
