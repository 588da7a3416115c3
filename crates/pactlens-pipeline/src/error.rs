use pactlens_core::CoreError;
use thiserror::Error;

use crate::state::PipelineState;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("illegal pipeline transition {from:?} -> {to:?}")]
    IllegalTransition {
        from: PipelineState,
        to: PipelineState,
    },

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
