//! Orchestrates one analysis: ingestion, the optional external reasoning
//! call, the rule-based stages, and report assembly.
//!
//! ```no_run
//! # async fn demo() -> Result<(), pactlens_pipeline::PipelineError> {
//! use pactlens_pipeline::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let analysis = pipeline.analyze("PRIVACY POLICY. We collect your data.").await?;
//! println!("{}", analysis.report.summary.title);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod orchestrator;
mod state;

pub use config::{DEFAULT_PROVIDER_TIMEOUT, PipelineConfig};
pub use error::PipelineError;
pub use orchestrator::{Analysis, FallbackReason, Pipeline, ReportSource};
pub use state::{PipelineState, Run};
