//! Per-run state machine and audit trail.
//!
//! ```text
//! Idle → Ingesting → Classifying → ExtractingClauses → AssessingRisk
//!      → Summarizing → AssemblingReport → Done
//!
//! Ingesting → ConsultingProvider → AssemblingReport
//!             ConsultingProvider → ExternalCallFailed → FallbackDeterministic → Classifying
//! ```
//!
//! Transitions only move forward. A [`Run`] lives on the stack of a single
//! analysis and is never shared.

use std::time::{Duration, Instant};

use pactlens_core::{AnalysisReport, ProcessingStep, ReportAssembler, RiskAssessment, Stage, Summary};
use tracing::debug;

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Idle,
    Ingesting,
    ConsultingProvider,
    ExternalCallFailed,
    FallbackDeterministic,
    Classifying,
    ExtractingClauses,
    AssessingRisk,
    Summarizing,
    AssemblingReport,
    Done,
}

impl PipelineState {
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Ingesting)
                | (Ingesting, Classifying)
                | (Ingesting, ConsultingProvider)
                | (ConsultingProvider, AssemblingReport)
                | (ConsultingProvider, ExternalCallFailed)
                | (ExternalCallFailed, FallbackDeterministic)
                | (FallbackDeterministic, Classifying)
                | (Classifying, ExtractingClauses)
                | (ExtractingClauses, AssessingRisk)
                | (AssessingRisk, Summarizing)
                | (Summarizing, AssemblingReport)
                | (AssemblingReport, Done)
        )
    }
}

/// State and processing steps of one pipeline execution.
pub struct Run {
    state: PipelineState,
    steps: Vec<ProcessingStep>,
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

impl Run {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
            steps: Vec::with_capacity(6),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn steps(&self) -> &[ProcessingStep] {
        &self.steps
    }

    pub fn advance(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        if !self.state.can_advance_to(next) {
            return Err(PipelineError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(from = ?self.state, to = ?next, "pipeline transition");
        self.state = next;
        Ok(())
    }

    /// Append a completed step for `stage`.
    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        debug!(
            agent = stage.agent(),
            elapsed_us = elapsed.as_micros() as u64,
            "stage completed"
        );
        self.steps.push(stage.completed(elapsed));
    }

    /// Enter `state`, run an infallible stage, and record it.
    pub fn stage<T>(
        &mut self,
        state: PipelineState,
        stage: Stage,
        f: impl FnOnce() -> T,
    ) -> Result<T, PipelineError> {
        self.advance(state)?;
        let start = Instant::now();
        let out = f();
        self.record(stage, start.elapsed());
        Ok(out)
    }

    /// Enter `state`, run a fallible stage, and record it on success.
    pub fn try_stage<T, E>(
        &mut self,
        state: PipelineState,
        stage: Stage,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, PipelineError>
    where
        PipelineError: From<E>,
    {
        self.advance(state)?;
        let start = Instant::now();
        let out = f()?;
        self.record(stage, start.elapsed());
        Ok(out)
    }

    /// Assemble the final report from the recorded steps and finish the run.
    pub fn assemble(
        &mut self,
        summary: Summary,
        assessment: RiskAssessment,
    ) -> Result<AnalysisReport, PipelineError> {
        self.advance(PipelineState::AssemblingReport)?;
        let steps = std::mem::take(&mut self.steps);
        let report = ReportAssembler::assemble(summary, assessment, steps)?;
        report.validate()?;
        self.advance(PipelineState::Done)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineState::*;

    #[test]
    fn rule_path_is_legal() {
        let mut run = Run::new();
        for next in [
            Ingesting,
            Classifying,
            ExtractingClauses,
            AssessingRisk,
            Summarizing,
            AssemblingReport,
            Done,
        ] {
            run.advance(next).unwrap();
        }
        assert_eq!(run.state(), Done);
    }

    #[test]
    fn fallback_path_is_legal() {
        let mut run = Run::new();
        for next in [
            Ingesting,
            ConsultingProvider,
            ExternalCallFailed,
            FallbackDeterministic,
            Classifying,
        ] {
            run.advance(next).unwrap();
        }
    }

    #[test]
    fn backwards_and_skips_are_illegal() {
        assert!(!Classifying.can_advance_to(Ingesting));
        assert!(!Idle.can_advance_to(Classifying));
        assert!(!Done.can_advance_to(Idle));
        assert!(!ExternalCallFailed.can_advance_to(ConsultingProvider));
        assert!(!Ingesting.can_advance_to(Ingesting));
    }

    #[test]
    fn illegal_advance_reports_states() {
        let mut run = Run::new();
        let err = run.advance(Summarizing).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::IllegalTransition {
                from: Idle,
                to: Summarizing
            }
        ));
        assert_eq!(run.state(), Idle);
    }

    #[test]
    fn stage_records_step_in_order() {
        let mut run = Run::new();
        let n = run.stage(Ingesting, Stage::Ingestion, || 42).unwrap();
        assert_eq!(n, 42);
        run.stage(Classifying, Stage::Classification, || ()).unwrap();
        let agents: Vec<&str> = run.steps().iter().map(|s| s.agent.as_str()).collect();
        assert_eq!(agents, vec!["Document Ingestion", "Legal Classification"]);
    }

    #[test]
    fn failed_stage_records_nothing() {
        let mut run = Run::new();
        let res: Result<(), PipelineError> = run.try_stage(Ingesting, Stage::Ingestion, || {
            Err(pactlens_core::CoreError::EmptyInput)
        });
        assert!(res.is_err());
        assert!(run.steps().is_empty());
    }
}
