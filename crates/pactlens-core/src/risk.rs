//! Risk stage: turns tagged clauses into typed findings.
//!
//! Severity is fixed per finding kind rather than computed from content.
//! General clauses produce no finding.
//!
//! Overall risk: any red flag makes the document High; otherwise more than
//! [`FINDING_THRESHOLD`] obligations or more than [`FINDING_THRESHOLD`]
//! rights/data-usage findings make it Medium; everything else is Low.

use crate::model::{
    Clause, ClauseCategory, Obligation, RedFlag, RedFlagSeverity, RightAndDataUsage,
    RiskAssessment, RiskLevel, Severity, excerpt,
};

/// Fixed confidence reported by the risk stage.
pub const RISK_CONFIDENCE: f32 = 0.87;

/// Finding count above which a document without red flags is Medium risk.
pub const FINDING_THRESHOLD: usize = 3;

const OBLIGATION_EXPLANATION: &str =
    "This clause creates a binding obligation that you must follow.";
const OBLIGATION_IMPACT: &str =
    "You must comply with this requirement to avoid potential consequences.";

const DATA_USAGE_EXPLANATION: &str = "This clause relates to how your personal data is handled.";
const DATA_USAGE_PROTECTION: &str = "Understanding this helps protect your privacy rights.";

const RED_FLAG_EXPLANATION: &str =
    "This clause presents significant legal risks and should be carefully reviewed.";
const RED_FLAG_RECOMMENDATION: &str =
    "Consider seeking legal advice before agreeing to this clause.";
const RED_FLAG_IMPLICATIONS: &str = "This clause may limit your rights or expose you to liability.";

/// Partition clauses into findings and derive the overall risk.
pub fn assess(clauses: &[Clause]) -> RiskAssessment {
    let mut obligations = Vec::new();
    let mut rights = Vec::new();
    let mut red_flags = Vec::new();

    for clause in clauses {
        match clause.category {
            ClauseCategory::Obligation => obligations.push(Obligation {
                id: clause.id,
                category: clause.section.clone(),
                clause: excerpt(&clause.text),
                explanation: OBLIGATION_EXPLANATION.to_string(),
                severity: Severity::Medium,
                impact: OBLIGATION_IMPACT.to_string(),
            }),
            ClauseCategory::DataUsage => rights.push(RightAndDataUsage {
                id: clause.id,
                category: clause.section.clone(),
                clause: excerpt(&clause.text),
                explanation: DATA_USAGE_EXPLANATION.to_string(),
                severity: Severity::Medium,
                user_protection: DATA_USAGE_PROTECTION.to_string(),
            }),
            ClauseCategory::Risk => red_flags.push(RedFlag {
                id: clause.id,
                category: clause.section.clone(),
                clause: excerpt(&clause.text),
                explanation: RED_FLAG_EXPLANATION.to_string(),
                severity: RedFlagSeverity::High,
                recommendation: RED_FLAG_RECOMMENDATION.to_string(),
                legal_implications: RED_FLAG_IMPLICATIONS.to_string(),
            }),
            ClauseCategory::General => {}
        }
    }

    let overall_risk = overall_risk(obligations.len(), rights.len(), red_flags.len());

    RiskAssessment {
        obligations,
        rights,
        red_flags,
        overall_risk,
    }
}

/// Overall risk from finding counts.
pub fn overall_risk(obligations: usize, rights: usize, red_flags: usize) -> RiskLevel {
    if red_flags > 0 {
        RiskLevel::High
    } else if obligations > FINDING_THRESHOLD || rights > FINDING_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn clause(text: &str, category: ClauseCategory) -> Clause {
        Clause {
            id: Uuid::new_v4(),
            text: text.to_string(),
            section: "General Terms".to_string(),
            category,
        }
    }

    #[test]
    fn partitions_by_category() {
        let clauses = vec![
            clause("you must comply", ClauseCategory::Obligation),
            clause("we collect data", ClauseCategory::DataUsage),
            clause("binding arbitration", ClauseCategory::Risk),
            clause("hello", ClauseCategory::General),
        ];
        let a = assess(&clauses);
        assert_eq!(a.obligations.len(), 1);
        assert_eq!(a.rights.len(), 1);
        assert_eq!(a.red_flags.len(), 1);
        assert_eq!(a.finding_count(), 3);
    }

    #[test]
    fn general_clauses_are_dropped() {
        let a = assess(&[clause("hello", ClauseCategory::General)]);
        assert_eq!(a.finding_count(), 0);
        assert_eq!(a.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn findings_keep_clause_identity() {
        let c = clause("you must comply", ClauseCategory::Obligation);
        let a = assess(std::slice::from_ref(&c));
        assert_eq!(a.obligations[0].id, c.id);
        assert_eq!(a.obligations[0].category, c.section);
    }

    #[test]
    fn fixed_severities() {
        let a = assess(&[
            clause("must", ClauseCategory::Obligation),
            clause("collect", ClauseCategory::DataUsage),
            clause("breach", ClauseCategory::Risk),
        ]);
        assert_eq!(a.obligations[0].severity, Severity::Medium);
        assert_eq!(a.rights[0].severity, Severity::Medium);
        assert_eq!(a.red_flags[0].severity, RedFlagSeverity::High);
    }

    #[test]
    fn long_clause_is_excerpted() {
        let long = "must ".repeat(100);
        let a = assess(&[clause(&long, ClauseCategory::Obligation)]);
        assert_eq!(a.obligations[0].clause.chars().count(), 200);
    }

    #[test]
    fn overall_risk_policy() {
        assert_eq!(overall_risk(0, 0, 1), RiskLevel::High);
        assert_eq!(overall_risk(10, 10, 1), RiskLevel::High);
        assert_eq!(overall_risk(4, 0, 0), RiskLevel::Medium);
        assert_eq!(overall_risk(0, 4, 0), RiskLevel::Medium);
        assert_eq!(overall_risk(3, 3, 0), RiskLevel::Low);
        assert_eq!(overall_risk(0, 0, 0), RiskLevel::Low);
    }
}
