//! Progress events emitted by the [`Pipeline`](super::Pipeline).
//!
//! Callers implement [`EventHandler`] to observe a run: print progress in a
//! CLI, update a form, count generator calls in tests.
//!
//! | Handler | Use case |
//! |---------|----------|
//! | [`NoopHandler`] | Default; no side effects |
//! | [`LoggingHandler`] | Structured logging via `tracing` |
//! | [`FnEventHandler`] | Quick closures for simple callbacks |

use tracing::{debug, info, warn};

/// Events emitted during [`Pipeline::summarize`](super::Pipeline::summarize).
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// Input passed validation and was split into chunks.
    Chunked { input_words: usize, chunks: usize },
    /// A per-chunk pass is about to run (1-based `index`).
    ChunkStarted {
        index: usize,
        total: usize,
        words: usize,
    },
    /// A per-chunk pass returned.
    ChunkSummarized {
        index: usize,
        total: usize,
        summary: &'a str,
    },
    /// The chain pass is about to run on the combined chunk summaries.
    ChainStarted { combined_words: usize },
    /// Final summary produced and scored.
    Finished {
        summary_words: usize,
        input_words: usize,
    },
    /// The request was rejected or failed. Carries the user-facing message.
    Failed { message: &'a str },
}

/// Handler for pipeline events. The default implementation ignores them.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        let _ = event;
    }
}

/// A handler that does nothing.
pub struct NoopHandler;
impl EventHandler for NoopHandler {}

/// Logs every event through `tracing`.
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::Chunked {
                input_words,
                chunks,
            } => info!("Summarizing {input_words} words in {chunks} chunk(s)"),
            PipelineEvent::ChunkStarted {
                index,
                total,
                words,
            } => debug!("Chunk {index}/{total}: {words} words"),
            PipelineEvent::ChunkSummarized {
                index,
                total,
                summary,
            } => debug!(
                "Chunk {index}/{total} summarized: {} words",
                crate::word_count(summary)
            ),
            PipelineEvent::ChainStarted { combined_words } => {
                debug!("Chain pass over {combined_words} combined words")
            }
            PipelineEvent::Finished {
                summary_words,
                input_words,
            } => info!("Summary: {summary_words} words from {input_words}"),
            PipelineEvent::Failed { message } => warn!("Summarization failed: {message}"),
        }
    }
}

/// An event handler backed by a closure.
///
/// ```ignore
/// let handler = FnEventHandler::new(|event| {
///     if let PipelineEvent::ChunkStarted { index, total, .. } = event {
///         eprintln!("  [chunk {index}/{total}]");
///     }
/// });
/// ```
pub struct FnEventHandler<F>(F)
where
    F: Fn(&PipelineEvent<'_>) + Send + Sync;

impl<F> FnEventHandler<F>
where
    F: Fn(&PipelineEvent<'_>) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EventHandler for FnEventHandler<F>
where
    F: Fn(&PipelineEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &PipelineEvent<'_>) {
        (self.0)(event)
    }
}
