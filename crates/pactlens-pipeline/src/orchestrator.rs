//! The analysis pipeline.
//!
//! Without a provider every run goes through the rule-based stages. With a
//! provider, stages 2 to 5 are first offered to it as one combined call. If
//! that call errors, times out, or answers with anything that does not
//! validate, the same run continues through the rule-based stages instead.
//! The provider is never retried and unvalidated provider output never
//! reaches the report.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use pactlens_ai::{DraftError, ReasoningProvider, ValidatedDraft, build_prompt, parse_draft};
use pactlens_core::{
    AnalysisReport, NormalizedDocument, RiskAssessment, Stage, Summary, classify, normalize, risk,
    segment, summarize,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::state::{PipelineState, Run};

/// Why a provider-backed run fell back to the rule-based stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error("provider call failed: {0}")]
    CallFailed(String),
    #[error("provider call timed out")]
    TimedOut,
    #[error("provider response contained no JSON object")]
    NoJson,
    #[error("provider response failed validation: {0}")]
    SchemaInvalid(String),
}

/// Where the findings and summary of a report came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// No provider configured.
    RuleBased,
    /// The provider's validated answer.
    Provider,
    /// A provider was configured but its answer was unusable.
    Fallback(FallbackReason),
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::Provider => "provider",
            Self::Fallback(_) => "fallback",
        }
    }
}

/// A report plus its provenance.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: AnalysisReport,
    pub source: ReportSource,
}

impl Analysis {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ReportSource::Fallback(_))
    }
}

/// The document analysis pipeline.
///
/// Cheap to clone and safe to share across tasks. The provider handle is
/// built once at startup and injected here; each call to
/// [`analyze`](Self::analyze) keeps all of its state local.
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    provider: Option<Arc<dyn ReasoningProvider>>,
}

impl Pipeline {
    /// A pipeline that only runs the rule-based stages.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// A pipeline that consults `provider` before falling back to rules.
    pub fn with_provider(config: PipelineConfig, provider: Arc<dyn ReasoningProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyse already-extracted document text.
    ///
    /// Fails only on empty input or an internal contract violation; provider
    /// problems are absorbed by the fallback chain.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, PipelineError> {
        let started = Instant::now();
        let now = Utc::now();
        let mut run = Run::new();

        let document = run.try_stage(PipelineState::Ingesting, Stage::Ingestion, || {
            normalize::normalize(text)
        })?;

        let (summary, assessment, source) = match &self.provider {
            None => {
                let (summary, assessment) = self.rule_stages(&mut run, &document, now)?;
                (summary, assessment, ReportSource::RuleBased)
            }
            Some(provider) => {
                run.advance(PipelineState::ConsultingProvider)?;
                let call_start = Instant::now();
                match self.consult(provider.as_ref(), &document.text).await {
                    Ok(draft) => {
                        run.record(Stage::ExternalReasoning, call_start.elapsed());
                        let (summary, assessment) =
                            draft.into_stage_outputs(document.word_count, now);
                        (summary, assessment, ReportSource::Provider)
                    }
                    Err(reason) => {
                        warn!(
                            provider = provider.name(),
                            reason = %reason,
                            "external reasoning unusable, falling back to rule-based stages"
                        );
                        run.advance(PipelineState::ExternalCallFailed)?;
                        run.advance(PipelineState::FallbackDeterministic)?;
                        let (summary, assessment) = self.rule_stages(&mut run, &document, now)?;
                        (summary, assessment, ReportSource::Fallback(reason))
                    }
                }
            }
        };

        let report = run.assemble(summary, assessment)?;

        info!(
            source = source.as_str(),
            document_type = %report.summary.document_type,
            risk = %report.summary.risk_level,
            obligations = report.obligations.len(),
            rights = report.rights_and_data_usage.len(),
            red_flags = report.red_flags.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(Analysis { report, source })
    }

    /// Stages 2 to 5, deterministic.
    fn rule_stages(
        &self,
        run: &mut Run,
        document: &NormalizedDocument,
        now: DateTime<Utc>,
    ) -> Result<(Summary, RiskAssessment), PipelineError> {
        let classification = run.stage(PipelineState::Classifying, Stage::Classification, || {
            classify::classify(&document.text)
        })?;

        let clauses = run.stage(
            PipelineState::ExtractingClauses,
            Stage::ClauseExtraction,
            || {
                segment::segment(
                    &document.text,
                    &classification.key_sections,
                    self.config.segmenter(),
                )
            },
        )?;

        let assessment = run.stage(PipelineState::AssessingRisk, Stage::RiskAnalysis, || {
            risk::assess(&clauses)
        })?;

        let summary = run.stage(PipelineState::Summarizing, Stage::Translation, || {
            summarize::summarize(
                classification.document_type,
                assessment.overall_risk,
                document.word_count,
                now,
            )
        })?;

        Ok((summary, assessment))
    }

    /// One bounded provider call, parsed and validated.
    async fn consult(
        &self,
        provider: &dyn ReasoningProvider,
        text: &str,
    ) -> Result<ValidatedDraft, FallbackReason> {
        let prompt = build_prompt(text);
        let completion =
            match tokio::time::timeout(self.config.provider_timeout(), provider.complete(&prompt))
                .await
            {
                Err(_) => return Err(FallbackReason::TimedOut),
                Ok(Err(e)) => return Err(FallbackReason::CallFailed(e.to_string())),
                Ok(Ok(completion)) => completion,
            };

        let draft = parse_draft(&completion).map_err(|e| match e {
            DraftError::NoJson => FallbackReason::NoJson,
            other => FallbackReason::SchemaInvalid(other.to_string()),
        })?;
        draft
            .validate(self.config.segmenter().max_clauses)
            .map_err(|e| FallbackReason::SchemaInvalid(e.to_string()))
    }
}
