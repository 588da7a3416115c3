//! Keyword-rule document classifier.
//!
//! Rules are evaluated in a fixed priority order and the first group with a
//! matching keyword decides the type. A document mentioning both "terms of
//! service" and "privacy policy" is therefore always Terms of Service.

use crate::model::{Classification, DocumentType};

/// Fixed confidence reported by the classification stage.
pub const CLASSIFICATION_CONFIDENCE: f32 = 0.92;

/// Keyword groups in priority order.
const RULES: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::TermsOfService,
        &[
            "terms of service",
            "terms of use",
            "user agreement",
            "service agreement",
        ],
    ),
    (
        DocumentType::PrivacyPolicy,
        &[
            "privacy policy",
            "data collection",
            "personal information",
            "cookie policy",
        ],
    ),
    (
        DocumentType::EmploymentContract,
        &[
            "employment agreement",
            "employment contract",
            "job description",
        ],
    ),
    (
        DocumentType::SoftwareLicense,
        &["software license", "mit license", "apache", "gpl"],
    ),
];

/// Classify normalised document text.
pub fn classify(text: &str) -> Classification {
    let document_type = detect_type(text);
    Classification {
        document_type,
        key_sections: key_sections(document_type)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        confidence: CLASSIFICATION_CONFIDENCE,
    }
}

/// First matching rule wins; `Unknown` when nothing matches.
pub fn detect_type(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(doc_type, _)| *doc_type)
        .unwrap_or(DocumentType::Unknown)
}

/// Expected section names for a document type.
pub fn key_sections(doc_type: DocumentType) -> &'static [&'static str] {
    match doc_type {
        DocumentType::TermsOfService => &[
            "User Obligations",
            "Service Terms",
            "Liability",
            "Termination",
            "Dispute Resolution",
        ],
        DocumentType::PrivacyPolicy => &[
            "Data Collection",
            "Data Usage",
            "Data Sharing",
            "User Rights",
            "Cookies",
        ],
        DocumentType::EmploymentContract => &[
            "Job Duties",
            "Compensation",
            "Benefits",
            "Termination",
            "Confidentiality",
        ],
        DocumentType::SoftwareLicense => &[
            "License Grant",
            "Restrictions",
            "Attribution",
            "Warranty",
            "Liability",
        ],
        DocumentType::Unknown => &["General Terms", "Conditions", "Rights", "Obligations"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_policy_detected() {
        let c = classify("PRIVACY POLICY. We collect your personal data.");
        assert_eq!(c.document_type, DocumentType::PrivacyPolicy);
        assert_eq!(c.key_sections[0], "Data Collection");
        assert_eq!(c.key_sections.len(), 5);
        assert_eq!(c.confidence, CLASSIFICATION_CONFIDENCE);
    }

    #[test]
    fn terms_of_service_beats_privacy_policy() {
        let text = "This Privacy Policy forms part of our Terms of Service.";
        assert_eq!(detect_type(text), DocumentType::TermsOfService);
    }

    #[test]
    fn employment_and_license() {
        assert_eq!(
            detect_type("This Employment Agreement is made between"),
            DocumentType::EmploymentContract
        );
        assert_eq!(
            detect_type("Released under the MIT License."),
            DocumentType::SoftwareLicense
        );
        assert_eq!(
            detect_type("Licensed under Apache 2.0"),
            DocumentType::SoftwareLicense
        );
    }

    #[test]
    fn unknown_fallback_sections() {
        let c = classify("This is a short neutral sentence about nothing legal.");
        assert_eq!(c.document_type, DocumentType::Unknown);
        assert_eq!(
            c.key_sections,
            vec!["General Terms", "Conditions", "Rights", "Obligations"]
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "By accepting this user agreement you consent to data collection.";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
    }
}
