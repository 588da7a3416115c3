//! Plain-language summary stage.

use chrono::{DateTime, Utc};

use crate::model::{DocumentType, RiskLevel, Sentiment, Summary};

/// Fixed confidence reported by the summary stage.
pub const SUMMARY_CONFIDENCE: f32 = 0.91;

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Build the document summary.
pub fn summarize(
    document_type: DocumentType,
    overall_risk: RiskLevel,
    word_count: usize,
    now: DateTime<Utc>,
) -> Summary {
    Summary {
        title: title(document_type),
        document_type,
        sentiment: sentiment(overall_risk),
        key_points: key_points(document_type)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        risk_level: overall_risk,
        reading_time: reading_time(word_count),
        last_updated: now,
    }
}

pub fn title(document_type: DocumentType) -> String {
    format!("Legal Document Analysis: {document_type}")
}

/// Whole minutes at [`WORDS_PER_MINUTE`], never less than one.
pub fn reading_time(word_count: usize) -> String {
    format!("{} min read", (word_count / WORDS_PER_MINUTE).max(1))
}

pub fn sentiment(risk: RiskLevel) -> Sentiment {
    match risk {
        RiskLevel::High => Sentiment::Negative,
        RiskLevel::Medium => Sentiment::Neutral,
        RiskLevel::Low => Sentiment::Positive,
    }
}

pub fn key_points(document_type: DocumentType) -> &'static [&'static str] {
    match document_type {
        DocumentType::PrivacyPolicy => &[
            "Explains how your personal data is collected and used",
            "Describes data sharing practices with third parties",
            "Outlines your rights regarding your personal information",
            "Details cookie usage and tracking technologies",
        ],
        DocumentType::TermsOfService => &[
            "Defines your responsibilities and obligations as a user",
            "Explains service limitations and restrictions",
            "Describes conditions for account termination",
            "Outlines dispute resolution procedures",
        ],
        DocumentType::EmploymentContract => &[
            "Defines job duties and responsibilities",
            "Outlines compensation and benefits",
            "Describes termination conditions",
            "Includes confidentiality and non-compete clauses",
        ],
        DocumentType::SoftwareLicense => &[
            "Grants specific usage rights for the software",
            "Lists restrictions on software use and distribution",
            "Defines warranty and support limitations",
            "Outlines attribution requirements",
        ],
        DocumentType::Unknown => &[
            "Contains important legal obligations and terms",
            "Includes provisions that may affect your rights",
            "Requires careful review before acceptance",
            "May have significant legal implications",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_floors_at_one_minute() {
        assert_eq!(reading_time(0), "1 min read");
        assert_eq!(reading_time(199), "1 min read");
        assert_eq!(reading_time(399), "1 min read");
        assert_eq!(reading_time(400), "2 min read");
        assert_eq!(reading_time(2050), "10 min read");
    }

    #[test]
    fn sentiment_follows_risk() {
        assert_eq!(sentiment(RiskLevel::High), Sentiment::Negative);
        assert_eq!(sentiment(RiskLevel::Medium), Sentiment::Neutral);
        assert_eq!(sentiment(RiskLevel::Low), Sentiment::Positive);
    }

    #[test]
    fn summary_fields() {
        let now = Utc::now();
        let s = summarize(DocumentType::PrivacyPolicy, RiskLevel::High, 450, now);
        assert_eq!(s.title, "Legal Document Analysis: Privacy Policy");
        assert_eq!(s.sentiment, Sentiment::Negative);
        assert_eq!(s.key_points.len(), 4);
        assert_eq!(s.reading_time, "2 min read");
        assert_eq!(s.last_updated, now);
    }

    #[test]
    fn unknown_uses_generic_points() {
        let points = key_points(DocumentType::Unknown);
        assert_eq!(points[0], "Contains important legal obligations and terms");
    }

    #[test]
    fn summary_serializes_camel_case() {
        let s = summarize(DocumentType::Unknown, RiskLevel::Low, 10, Utc::now());
        let v = serde_json::to_value(&s).unwrap();
        for key in [
            "title",
            "documentType",
            "sentiment",
            "keyPoints",
            "riskLevel",
            "readingTime",
            "lastUpdated",
        ] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(v["documentType"], "Unknown");
        assert_eq!(v["riskLevel"], "Low");
    }
}
