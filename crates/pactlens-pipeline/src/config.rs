//! Pipeline configuration.
//!
//! Resolved once at startup and handed to [`Pipeline`](crate::Pipeline);
//! nothing in the pipeline reads the environment during a run.

use std::time::Duration;

use pactlens_core::SegmenterConfig;

use crate::error::PipelineError;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    segmenter: SegmenterConfig,
    provider_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::STANDARD,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    pub fn new(
        segmenter: SegmenterConfig,
        provider_timeout: Duration,
    ) -> Result<Self, PipelineError> {
        if segmenter.max_clauses == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_clauses must be at least 1".into(),
            ));
        }
        if provider_timeout.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "provider timeout must be non-zero".into(),
            ));
        }
        Ok(Self {
            segmenter,
            provider_timeout,
        })
    }

    pub fn segmenter(&self) -> &SegmenterConfig {
        &self.segmenter
    }

    pub fn provider_timeout(&self) -> Duration {
        self.provider_timeout
    }
}
