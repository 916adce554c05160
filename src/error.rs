//! Failures that abort a report generation.
//!
//! A missing sentiment or NPS pattern is not an error; the parser returns
//! `None` and the corresponding chart is skipped.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Search failed: {0}")]
    SearchFailure(String),

    #[error("Language model error ({status}): {body}")]
    ProviderFailure { status: u16, body: String },

    #[error("Malformed language model response: {0}")]
    MalformedResponse(String),

    #[error("Failed to reach language model: {0}")]
    Transport(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

impl ReportError {
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchFailure(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
