//! Provider response parsing and validation.
//!
//! A provider answers with a [`ReportDraft`]: the report minus ids, title,
//! reading time, timestamps and audit trail, which are always computed
//! locally. A draft is only usable once [`ReportDraft::validate`] has turned
//! every free-form field into its typed counterpart. Any failure rejects the
//! whole draft.

use chrono::{DateTime, Utc};
use pactlens_core::model::MAX_EXCERPT_CHARS;
use pactlens_core::risk::overall_risk;
use pactlens_core::summarize::{reading_time, sentiment as sentiment_for, title};
use pactlens_core::{
    DocumentType, Obligation, RedFlag, RedFlagSeverity, RightAndDataUsage, RiskAssessment,
    RiskLevel, Sentiment, Severity, Summary,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::prompt::extract_json_object;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("no JSON object in provider response")]
    NoJson,
    #[error("provider JSON does not match the draft schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid draft: {0}")]
    Invalid(String),
}

// ── Wire types ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDraft {
    pub document_type: String,
    pub sentiment: String,
    pub key_points: Vec<String>,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationDraft {
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: String,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightDraft {
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: String,
    #[serde(rename = "userProtection")]
    pub user_protection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlagDraft {
    pub category: String,
    pub clause: String,
    pub explanation: String,
    pub severity: String,
    pub recommendation: String,
    #[serde(rename = "legalImplications")]
    pub legal_implications: String,
}

/// The JSON object a provider is asked to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDraft {
    pub summary: SummaryDraft,
    #[serde(default)]
    pub obligations: Vec<ObligationDraft>,
    #[serde(default)]
    pub rights_and_data_usage: Vec<RightDraft>,
    #[serde(default)]
    pub red_flags: Vec<RedFlagDraft>,
}

/// Locate and deserialize the draft inside a raw completion.
pub fn parse_draft(completion: &str) -> Result<ReportDraft, DraftError> {
    let json = extract_json_object(completion).ok_or(DraftError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}

// ── Validated form ──

/// A draft whose every field has been checked and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub document_type: DocumentType,
    pub sentiment: Sentiment,
    pub key_points: Vec<String>,
    pub risk_level: RiskLevel,
    pub obligations: Vec<Obligation>,
    pub rights: Vec<RightAndDataUsage>,
    pub red_flags: Vec<RedFlag>,
}

impl ReportDraft {
    /// Type every field and enforce the limits.
    ///
    /// `max_findings` caps obligations, rights and red flags combined, the
    /// same bound the segmenter puts on clauses. The stated risk level and
    /// sentiment must parse, but the validated values are recomputed from
    /// the findings so both paths share one risk policy.
    pub fn validate(self, max_findings: usize) -> Result<ValidatedDraft, DraftError> {
        let summary = self.summary;
        let document_type: DocumentType = typed(&summary.document_type, "documentType")?;
        let stated_sentiment: Sentiment = typed(&summary.sentiment, "sentiment")?;
        let stated_risk: RiskLevel = typed(&summary.risk_level, "riskLevel")?;

        let key_points: Vec<String> = summary
            .key_points
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if key_points.is_empty() {
            return Err(DraftError::Invalid("summary has no key points".into()));
        }

        let total =
            self.obligations.len() + self.rights_and_data_usage.len() + self.red_flags.len();
        if total > max_findings {
            return Err(DraftError::Invalid(format!(
                "{total} findings, limit is {max_findings}"
            )));
        }

        let obligations = self
            .obligations
            .into_iter()
            .map(|d| {
                Ok(Obligation {
                    id: Uuid::new_v4(),
                    category: text(d.category, "category")?,
                    clause: clause(d.clause)?,
                    explanation: text(d.explanation, "explanation")?,
                    severity: typed(&d.severity, "severity")?,
                    impact: text(d.impact, "impact")?,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        let rights = self
            .rights_and_data_usage
            .into_iter()
            .map(|d| {
                Ok(RightAndDataUsage {
                    id: Uuid::new_v4(),
                    category: text(d.category, "category")?,
                    clause: clause(d.clause)?,
                    explanation: text(d.explanation, "explanation")?,
                    severity: typed(&d.severity, "severity")?,
                    user_protection: text(d.user_protection, "userProtection")?,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        let red_flags = self
            .red_flags
            .into_iter()
            .map(|d| {
                let severity: Severity = typed(&d.severity, "severity")?;
                let severity = RedFlagSeverity::try_from(severity)
                    .map_err(|e| DraftError::Invalid(e.to_string()))?;
                Ok(RedFlag {
                    id: Uuid::new_v4(),
                    category: text(d.category, "category")?,
                    clause: clause(d.clause)?,
                    explanation: text(d.explanation, "explanation")?,
                    severity,
                    recommendation: text(d.recommendation, "recommendation")?,
                    legal_implications: text(d.legal_implications, "legalImplications")?,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        let risk_level = overall_risk(obligations.len(), rights.len(), red_flags.len());
        let sentiment = sentiment_for(risk_level);
        if risk_level != stated_risk || sentiment != stated_sentiment {
            debug!(
                stated_risk = %stated_risk,
                risk = %risk_level,
                "provider risk disagrees with its findings, using derived value"
            );
        }

        Ok(ValidatedDraft {
            document_type,
            sentiment,
            key_points,
            risk_level,
            obligations,
            rights,
            red_flags,
        })
    }
}

impl ValidatedDraft {
    /// Split into the same stage outputs the rule-based path produces.
    pub fn into_stage_outputs(
        self,
        word_count: usize,
        now: DateTime<Utc>,
    ) -> (Summary, RiskAssessment) {
        let summary = Summary {
            title: title(self.document_type),
            document_type: self.document_type,
            sentiment: self.sentiment,
            key_points: self.key_points,
            risk_level: self.risk_level,
            reading_time: reading_time(word_count),
            last_updated: now,
        };
        let assessment = RiskAssessment {
            obligations: self.obligations,
            rights: self.rights,
            red_flags: self.red_flags,
            overall_risk: self.risk_level,
        };
        (summary, assessment)
    }
}

fn typed<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, DraftError> {
    value
        .parse()
        .map_err(|_| DraftError::Invalid(format!("{field}: unrecognised value {value:?}")))
}

fn text(value: String, field: &str) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftError::Invalid(format!("{field} is empty")));
    }
    Ok(trimmed.to_string())
}

fn clause(value: String) -> Result<String, DraftError> {
    let value = text(value, "clause")?;
    let len = value.chars().count();
    if len > MAX_EXCERPT_CHARS {
        return Err(DraftError::Invalid(format!(
            "clause has {len} chars, limit is {MAX_EXCERPT_CHARS}"
        )));
    }
    Ok(value)
}
