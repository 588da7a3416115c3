use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("document text is empty")]
    EmptyInput,

    #[error("unparsable step duration: {0:?}")]
    InvalidDuration(String),

    #[error("unknown clause category: {0:?}")]
    InvalidCategory(String),

    #[error("report schema violation: {0}")]
    SchemaViolation(String),
}
