//! Error types for the summarization pipeline and the history store.
//!
//! [`SummarizeError`] is the closed set of request-level failures returned by
//! [`Pipeline::summarize`](crate::pipeline::Pipeline::summarize). Its
//! `Display` output is the message shown to the user in place of a summary.
//!
//! [`HistoryError`] never crosses the public API of
//! [`HistoryStore`](crate::history::HistoryStore): the store logs it and
//! carries on.

use thiserror::Error;

/// A request-level failure of the summarization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// The input was empty or contained only whitespace.
    #[error("Please enter text to summarize.")]
    EmptyInput,

    /// The input had fewer words than the configured minimum.
    #[error("Please enter at least {minimum} words. Current: {actual} words.")]
    InsufficientLength { actual: usize, minimum: usize },

    /// The generator or the scorer failed. Carries the collaborator's message.
    #[error("Error generating summary: {0}")]
    Generation(String),
}

impl SummarizeError {
    /// Number of words still missing for an [`InsufficientLength`] error.
    ///
    /// Zero for every other variant.
    ///
    /// [`InsufficientLength`]: SummarizeError::InsufficientLength
    pub fn shortfall(&self) -> usize {
        match self {
            SummarizeError::InsufficientLength { actual, minimum } => {
                minimum.saturating_sub(*actual)
            }
            _ => 0,
        }
    }
}

/// Failure reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
