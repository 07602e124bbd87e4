//! Convenience re-exports for common `precis-rs` types.
//!
//! ```ignore
//! use precis_rs::prelude::*;
//! ```

pub use crate::error::SummarizeError;
pub use crate::generate::{
    GenerateFuture, GenerationParams, Generator, OpenRouterConfig, OpenRouterGenerator,
};
pub use crate::history::{HistoryConfig, HistoryEntry, HistoryStore};
pub use crate::pipeline::{
    EventHandler, FnEventHandler, LoggingHandler, NoopHandler, Pipeline, PipelineConfig,
    PipelineEvent, SummaryResult,
};
pub use crate::score::{OverlapScores, RougeScorer, Scorer};
