//! Pipeline stage identities for the audit trail.

use std::time::Duration;

use crate::model::{ProcessingStep, StepStatus};
use crate::{classify, normalize, report, risk, segment, summarize};

/// Fixed confidence recorded when the external reasoning provider answers.
pub const PROVIDER_CONFIDENCE: f32 = 0.90;

/// A stage of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Ingestion,
    Classification,
    ClauseExtraction,
    RiskAnalysis,
    Translation,
    /// Stages 2 to 5 answered by the external reasoning provider in one call.
    ExternalReasoning,
    ReportGeneration,
}

impl Stage {
    /// Agent name shown in the report's processing steps.
    pub fn agent(&self) -> &'static str {
        match self {
            Self::Ingestion => "Document Ingestion",
            Self::Classification => "Legal Classification",
            Self::ClauseExtraction => "Clause Extraction",
            Self::RiskAnalysis => "Risk Analysis",
            Self::Translation => "Plain English Translation",
            Self::ExternalReasoning => "External Reasoning",
            Self::ReportGeneration => "Report Generation",
        }
    }

    pub fn confidence(&self) -> f32 {
        match self {
            Self::Ingestion => normalize::INGESTION_CONFIDENCE,
            Self::Classification => classify::CLASSIFICATION_CONFIDENCE,
            Self::ClauseExtraction => segment::EXTRACTION_CONFIDENCE,
            Self::RiskAnalysis => risk::RISK_CONFIDENCE,
            Self::Translation => summarize::SUMMARY_CONFIDENCE,
            Self::ExternalReasoning => PROVIDER_CONFIDENCE,
            Self::ReportGeneration => report::REPORT_CONFIDENCE,
        }
    }

    /// A completed audit-trail entry for this stage.
    pub fn completed(&self, elapsed: Duration) -> ProcessingStep {
        ProcessingStep {
            agent: self.agent().to_string(),
            status: StepStatus::Completed,
            duration: report::format_seconds(elapsed.as_secs_f64()),
            confidence: self.confidence(),
        }
    }
}
