//! Core types, rule-based analysis stages, and report assembly.
//!
//! Stages run in order: [`normalize`] → [`classify`] → [`segment`] →
//! [`risk`] → [`summarize`] → [`report`]. Each is a pure function of the
//! previous stage's output.

pub mod classify;
mod error;
pub mod model;
pub mod normalize;
pub mod report;
pub mod risk;
pub mod segment;
pub mod stage;
pub mod summarize;

pub use error::CoreError;
pub use model::{
    AnalysisReport, AssemblyLine, Classification, Clause, ClauseCategory, DocumentType,
    NormalizedDocument, Obligation, ProcessingStep, RedFlag, RedFlagSeverity, RightAndDataUsage,
    RiskAssessment, RiskLevel, Sentiment, Severity, StepStatus, Summary,
};
pub use report::ReportAssembler;
pub use segment::SegmenterConfig;
pub use stage::Stage;
