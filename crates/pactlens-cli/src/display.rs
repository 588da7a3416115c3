//! Vertical card display for analysis reports.
//!
//! Renders the summary, each finding group, and the processing steps as a
//! grouped, human-readable card.

use std::fmt;

use pactlens_core::{Obligation, RedFlag, RightAndDataUsage, Severity};
use pactlens_pipeline::{Analysis, ReportSource};

const MAX_LIST_ITEMS: usize = 10;
const MAX_CLAUSE_CHARS: usize = 80;

/// A report formatted for a terminal.
pub struct Card<'a>(pub &'a Analysis);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Analysis { report, source } = self.0;
        let summary = &report.summary;

        writeln!(f, "=== {} ===", summary.title)?;
        writeln!(f)?;

        writeln!(f, "Summary")?;
        row(f, "document type", &summary.document_type)?;
        row(f, "risk level", &summary.risk_level)?;
        row(f, "sentiment", &summary.sentiment.as_str())?;
        row(f, "reading time", &summary.reading_time)?;
        row(f, "analysed", &summary.last_updated.format("%Y-%m-%d %H:%M:%S UTC"))?;
        row(f, "source", &source_label(source))?;
        if !summary.key_points.is_empty() {
            writeln!(f, "  key points:")?;
            for point in &summary.key_points {
                writeln!(f, "    - {point}")?;
            }
        }
        writeln!(f)?;

        let flags: Vec<Finding> = report.red_flags.iter().map(Finding::from).collect();
        let obligations: Vec<Finding> = report.obligations.iter().map(Finding::from).collect();
        let rights: Vec<Finding> = report
            .rights_and_data_usage
            .iter()
            .map(Finding::from)
            .collect();
        section(f, "Red Flags", &flags)?;
        section(f, "Obligations", &obligations)?;
        section(f, "Rights and Data Usage", &rights)?;

        let line = &report.ai_assembly_line;
        writeln!(f, "Processing")?;
        for step in &line.processing_steps {
            writeln!(
                f,
                "  {:<26} {:>8}  {:.2}",
                step.agent, step.duration, step.confidence
            )?;
        }
        row(f, "total", &line.total_processing_time)?;
        Ok(())
    }
}

/// Provenance of a report, with the fallback reason when there is one.
pub fn source_label(source: &ReportSource) -> String {
    match source {
        ReportSource::Fallback(reason) => format!("fallback ({reason})"),
        other => other.as_str().to_string(),
    }
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display) -> fmt::Result {
    writeln!(f, "  {label:<26} {value}")
}

// ── Findings ──

/// The columns every finding kind shares.
struct Finding<'a> {
    category: &'a str,
    severity: Severity,
    clause: &'a str,
    advice: &'a str,
}

impl<'a> From<&'a RedFlag> for Finding<'a> {
    fn from(flag: &'a RedFlag) -> Self {
        Self {
            category: &flag.category,
            severity: flag.severity.into(),
            clause: &flag.clause,
            advice: &flag.recommendation,
        }
    }
}

impl<'a> From<&'a Obligation> for Finding<'a> {
    fn from(obligation: &'a Obligation) -> Self {
        Self {
            category: &obligation.category,
            severity: obligation.severity,
            clause: &obligation.clause,
            advice: &obligation.impact,
        }
    }
}

impl<'a> From<&'a RightAndDataUsage> for Finding<'a> {
    fn from(right: &'a RightAndDataUsage) -> Self {
        Self {
            category: &right.category,
            severity: right.severity,
            clause: &right.clause,
            advice: &right.user_protection,
        }
    }
}

fn section(f: &mut fmt::Formatter<'_>, header: &str, findings: &[Finding<'_>]) -> fmt::Result {
    if findings.is_empty() {
        return Ok(());
    }
    writeln!(f, "{header} ({}):", findings.len())?;
    for finding in findings.iter().take(MAX_LIST_ITEMS) {
        writeln!(f, "  [{}] {}", finding.severity, finding.category)?;
        writeln!(f, "      \"{}\"", shorten(finding.clause))?;
        writeln!(f, "      {}", finding.advice)?;
    }
    if findings.len() > MAX_LIST_ITEMS {
        writeln!(f, "  ... and {} more", findings.len() - MAX_LIST_ITEMS)?;
    }
    writeln!(f)
}

fn shorten(text: &str) -> String {
    if text.chars().count() > MAX_CLAUSE_CHARS {
        let cut: String = text.chars().take(MAX_CLAUSE_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
