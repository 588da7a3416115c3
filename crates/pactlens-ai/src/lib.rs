//! External reasoning layer: an LLM may answer classification, clause
//! extraction, risk scoring and summarisation in one call.
//!
//! Completions are untrusted. They only reach a report through
//! [`parse_draft`] and [`ReportDraft::validate`].

pub mod draft;
pub mod http;
pub mod mock;
pub mod prompt;
mod provider;

pub use draft::{DraftError, ReportDraft, ValidatedDraft, parse_draft};
pub use http::{HttpProvider, HttpProviderConfig};
pub use mock::{MockBehavior, MockProvider};
pub use prompt::build_prompt;
pub use provider::{ProviderError, ReasoningProvider};
