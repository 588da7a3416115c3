//! Report data model.
//!
//! Every stage of the analysis pipeline produces one of these value types and
//! hands it forward; nothing here is mutated after construction. Field names
//! on the serialized report are fixed by the wire schema consumed by the
//! front end, so the serde renames below are load-bearing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Maximum length (in chars) of a clause excerpt carried by a finding.
pub const MAX_EXCERPT_CHARS: usize = 200;

// ── Enumerations ──

/// Coarse document type produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Terms of Service")]
    TermsOfService,
    #[serde(rename = "Privacy Policy")]
    PrivacyPolicy,
    #[serde(rename = "Employment Contract")]
    EmploymentContract,
    #[serde(rename = "Software License")]
    SoftwareLicense,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TermsOfService => "Terms of Service",
            Self::PrivacyPolicy => "Privacy Policy",
            Self::EmploymentContract => "Employment Contract",
            Self::SoftwareLicense => "Software License",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    /// Case-insensitive; underscores and hyphens are treated as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-'], " ");
        match key.as_str() {
            "terms of service" => Ok(Self::TermsOfService),
            "privacy policy" => Ok(Self::PrivacyPolicy),
            "employment contract" => Ok(Self::EmploymentContract),
            "software license" => Ok(Self::SoftwareLicense),
            "unknown" => Ok(Self::Unknown),
            _ => Err(CoreError::SchemaViolation(format!(
                "unknown document type: {s:?}"
            ))),
        }
    }
}

/// Per-finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(CoreError::SchemaViolation(format!("unknown severity: {s:?}"))),
        }
    }
}

/// Severity of a red flag. Only the two top levels exist, so a Low or Medium
/// red flag cannot be built or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedFlagSeverity {
    High,
    Critical,
}

impl From<RedFlagSeverity> for Severity {
    fn from(s: RedFlagSeverity) -> Self {
        match s {
            RedFlagSeverity::High => Severity::High,
            RedFlagSeverity::Critical => Severity::Critical,
        }
    }
}

impl TryFrom<Severity> for RedFlagSeverity {
    type Error = CoreError;

    fn try_from(s: Severity) -> Result<Self, Self::Error> {
        match s {
            Severity::High => Ok(Self::High),
            Severity::Critical => Ok(Self::Critical),
            other => Err(CoreError::SchemaViolation(format!(
                "red flag severity must be High or Critical, got {other}"
            ))),
        }
    }
}

/// Overall document risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::SchemaViolation(format!("unknown risk level: {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(CoreError::SchemaViolation(format!("unknown sentiment: {s:?}"))),
        }
    }
}

/// Coarse clause category assigned by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseCategory {
    Risk,
    DataUsage,
    Obligation,
    General,
}

impl ClauseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::DataUsage => "data_usage",
            Self::Obligation => "obligation",
            Self::General => "general",
        }
    }
}

impl FromStr for ClauseCategory {
    type Err = CoreError;

    /// Exact match only. An unknown category is a contract violation
    /// between stages and is never mapped to `General`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "risk" => Ok(Self::Risk),
            "data_usage" => Ok(Self::DataUsage),
            "obligation" => Ok(Self::Obligation),
            "general" => Ok(Self::General),
            other => Err(CoreError::InvalidCategory(other.to_string())),
        }
    }
}

/// Status of a pipeline stage in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Completed,
}

// ── Stage outputs ──

/// Output of the ingestion stage.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    pub text: String,
    pub word_count: usize,
    /// Always "English"; language detection is not implemented.
    pub detected_language: String,
    pub confidence: f32,
}

/// Output of the classification stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub document_type: DocumentType,
    /// Expected section names, in matching priority order.
    pub key_sections: Vec<String>,
    pub confidence: f32,
}

/// A sentence-level unit of document text, tagged for risk analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub id: Uuid,
    pub text: String,
    /// One of the classification's key sections, or "General Terms".
    pub section: String,
    pub category: ClauseCategory,
}

// ── Findings ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub id: Uuid,
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: Severity,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightAndDataUsage {
    pub id: Uuid,
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: Severity,
    #[serde(rename = "userProtection")]
    pub user_protection: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: Uuid,
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: RedFlagSeverity,
    pub recommendation: String,
    #[serde(rename = "legalImplications")]
    pub legal_implications: String,
}

/// Output of the risk stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub obligations: Vec<Obligation>,
    pub rights: Vec<RightAndDataUsage>,
    pub red_flags: Vec<RedFlag>,
    pub overall_risk: RiskLevel,
}

impl RiskAssessment {
    pub fn finding_count(&self) -> usize {
        self.obligations.len() + self.rights.len() + self.red_flags.len()
    }
}

/// Plain-language summary of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub title: String,
    pub document_type: DocumentType,
    pub sentiment: Sentiment,
    pub key_points: Vec<String>,
    pub risk_level: RiskLevel,
    pub reading_time: String,
    pub last_updated: DateTime<Utc>,
}

// ── Audit trail and report ──

/// One audit-trail entry per executed stage, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    pub agent: String,
    pub status: StepStatus,
    /// Seconds with a trailing unit, e.g. "0.004s".
    pub duration: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyLine {
    pub processing_steps: Vec<ProcessingStep>,
    pub total_processing_time: String,
}

/// The externally visible analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub obligations: Vec<Obligation>,
    pub rights_and_data_usage: Vec<RightAndDataUsage>,
    pub red_flags: Vec<RedFlag>,
    pub ai_assembly_line: AssemblyLine,
}

/// Cut clause text to at most [`MAX_EXCERPT_CHARS`] chars, marking the cut
/// with a trailing `...`.
pub fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_EXCERPT_CHARS - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_wire_names() {
        let json = serde_json::to_string(&DocumentType::TermsOfService).unwrap();
        assert_eq!(json, "\"Terms of Service\"");
        let parsed: DocumentType = serde_json::from_str("\"Privacy Policy\"").unwrap();
        assert_eq!(parsed, DocumentType::PrivacyPolicy);
    }

    #[test]
    fn document_type_from_str_is_lenient() {
        assert_eq!(
            "terms_of_service".parse::<DocumentType>().unwrap(),
            DocumentType::TermsOfService
        );
        assert_eq!(
            "Software-License".parse::<DocumentType>().unwrap(),
            DocumentType::SoftwareLicense
        );
        assert!("contract".parse::<DocumentType>().is_err());
    }

    #[test]
    fn severity_parse_case_insensitive() {
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn red_flag_severity_rejects_low_levels() {
        assert!(RedFlagSeverity::try_from(Severity::Medium).is_err());
        assert!(RedFlagSeverity::try_from(Severity::Low).is_err());
        assert_eq!(
            RedFlagSeverity::try_from(Severity::Critical).unwrap(),
            RedFlagSeverity::Critical
        );
        let err = serde_json::from_str::<RedFlagSeverity>("\"Medium\"");
        assert!(err.is_err());
    }

    #[test]
    fn clause_category_rejects_unknown() {
        assert_eq!(
            "data_usage".parse::<ClauseCategory>().unwrap(),
            ClauseCategory::DataUsage
        );
        match "terms".parse::<ClauseCategory>() {
            Err(CoreError::InvalidCategory(v)) => assert_eq!(v, "terms"),
            other => panic!("expected InvalidCategory, got {other:?}"),
        }
        assert!(serde_json::from_str::<ClauseCategory>("\"terms\"").is_err());
    }

    #[test]
    fn step_status_serializes_lowercase() {
        let json = serde_json::to_string(&StepStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("short clause"), "short clause");
    }

    #[test]
    fn excerpt_truncates_to_limit() {
        let long = "x".repeat(450);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), MAX_EXCERPT_CHARS);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn excerpt_counts_chars_not_bytes() {
        let long = "é".repeat(MAX_EXCERPT_CHARS);
        assert_eq!(excerpt(&long), long);
    }
}
