//! Report assembly and schema validation.
//!
//! The assembler appends its own `Report Generation` step before totalling,
//! so `total_processing_time` always equals the sum of every step in the
//! audit trail.

use std::time::Instant;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    AnalysisReport, AssemblyLine, MAX_EXCERPT_CHARS, ProcessingStep, RiskAssessment, Summary,
};
use crate::stage::Stage;

/// Fixed confidence reported by the report stage.
pub const REPORT_CONFIDENCE: f32 = 0.93;

/// Largest allowed gap between the reported total and the step sum.
const TOTAL_TOLERANCE: f64 = 1e-6;

/// Render seconds the way steps carry them: three decimals and an `s` unit.
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.3}s")
}

/// Parse a step duration back into seconds.
///
/// Accepts a trailing `s` or `ms` unit (or none). Anything that is not a
/// finite, non-negative number is an error, never zero.
pub fn parse_seconds(duration: &str) -> Result<f64, CoreError> {
    let trimmed = duration.trim();
    let (number, scale) = if let Some(ms) = trimmed.strip_suffix("ms") {
        (ms, 1e-3)
    } else if let Some(s) = trimmed.strip_suffix('s') {
        (s, 1.0)
    } else {
        (trimmed, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidDuration(duration.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidDuration(duration.to_string()));
    }
    Ok(value * scale)
}

/// Sum of all step durations, in seconds.
pub fn total_seconds(steps: &[ProcessingStep]) -> Result<f64, CoreError> {
    steps.iter().map(|s| parse_seconds(&s.duration)).sum()
}

/// Merges stage outputs into the final report.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Build the report, appending the report-generation step to `steps`.
    pub fn assemble(
        summary: Summary,
        assessment: RiskAssessment,
        mut steps: Vec<ProcessingStep>,
    ) -> Result<AnalysisReport, CoreError> {
        let start = Instant::now();

        let RiskAssessment {
            obligations,
            rights,
            red_flags,
            ..
        } = assessment;

        // Parse before timing ends so a bad upstream duration fails here.
        total_seconds(&steps)?;
        steps.push(Stage::ReportGeneration.completed(start.elapsed()));
        let total = total_seconds(&steps)?;

        debug!(steps = steps.len(), total_secs = total, "report assembled");

        Ok(AnalysisReport {
            summary,
            obligations,
            rights_and_data_usage: rights,
            red_flags,
            ai_assembly_line: AssemblyLine {
                processing_steps: steps,
                total_processing_time: format_seconds(total),
            },
        })
    }
}

impl AnalysisReport {
    /// Check the invariants every report handed to a caller must satisfy.
    pub fn validate(&self) -> Result<(), CoreError> {
        let violation = |msg: String| Err(CoreError::SchemaViolation(msg));

        if self.summary.title.trim().is_empty() {
            return violation("summary title is empty".into());
        }
        if self.summary.key_points.is_empty() {
            return violation("summary has no key points".into());
        }

        let excerpts = self
            .obligations
            .iter()
            .map(|f| &f.clause)
            .chain(self.rights_and_data_usage.iter().map(|f| &f.clause))
            .chain(self.red_flags.iter().map(|f| &f.clause));
        for clause in excerpts {
            let len = clause.chars().count();
            if len == 0 {
                return violation("finding has an empty clause".into());
            }
            if len > MAX_EXCERPT_CHARS {
                return violation(format!("clause excerpt has {len} chars"));
            }
        }

        let line = &self.ai_assembly_line;
        if line.processing_steps.is_empty() {
            return violation("no processing steps recorded".into());
        }
        for step in &line.processing_steps {
            if !(0.0..=1.0).contains(&step.confidence) {
                return violation(format!(
                    "step {:?} confidence {} outside [0, 1]",
                    step.agent, step.confidence
                ));
            }
        }

        let sum = total_seconds(&line.processing_steps)?;
        let total = parse_seconds(&line.total_processing_time)?;
        if (total - sum).abs() > TOTAL_TOLERANCE {
            return violation(format!(
                "total processing time {total} does not match step sum {sum}"
            ));
        }

        Ok(())
    }
}
