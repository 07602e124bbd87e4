//! The chunk-and-chain summarization pipeline.
//!
//! [`Pipeline::summarize`] runs one request to completion:
//!
//! 1. **Validate**: reject blank input and input under `min_words`
//!    before any model call.
//! 2. **Chunk**: split into runs of at most `max_chunk_words` words
//!    ([`chunk::split_into_chunks`]).
//! 3. **Summarize each chunk**: one [`Generator`] call per chunk, in
//!    order, with the short chunk profile.
//! 4. **Combine**: join the chunk summaries with a single space. Overlap
//!    between neighbouring summaries is kept as is.
//! 5. **Chain**: one more generator call over the combined text with the
//!    longer chain profile. This pass always runs, also when there was only
//!    one chunk.
//! 6. **Score**: compare the final summary against the original input
//!    with the [`Scorer`].
//! 7. **Record**: append a [`HistoryEntry`] to the [`HistoryStore`].
//!
//! Generator and scorer failures become [`SummarizeError::Generation`];
//! nothing is recorded for a failed request. History write failures are
//! swallowed by the store and never reach the caller.

pub mod chunk;
pub mod config;
pub mod events;

pub use chunk::{split_into_chunks, word_count};
pub use config::{DecodingConfig, LengthProfile, PipelineConfig};
pub use events::{EventHandler, FnEventHandler, LoggingHandler, NoopHandler, PipelineEvent};

use crate::error::SummarizeError;
use crate::generate::Generator;
use crate::history::{HistoryEntry, HistoryStore};
use crate::score::{OverlapScores, Scorer};

/// Outcome of a successful [`Pipeline::summarize`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    /// The final, chained summary.
    pub summary: String,
    /// Word count of `summary`.
    pub summary_words: usize,
    /// Word count of the original input.
    pub input_words: usize,
    /// Overlap of `summary` against the original input.
    pub scores: OverlapScores,
}

/// Chunk-and-chain summarizer over injected collaborators.
///
/// # Example
///
/// ```ignore
/// let generator = OpenRouterGenerator::from_env(OpenRouterConfig::default())?;
/// let history = HistoryStore::default();
///
/// let result = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default())
///     .with_event_handler(&LoggingHandler)
///     .summarize(&article)
///     .await;
/// ```
pub struct Pipeline<'a> {
    generator: &'a dyn Generator,
    scorer: &'a dyn Scorer,
    history: &'a HistoryStore,
    config: PipelineConfig,
    event_handler: &'a dyn EventHandler,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        generator: &'a dyn Generator,
        scorer: &'a dyn Scorer,
        history: &'a HistoryStore,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            scorer,
            history,
            config,
            event_handler: &NoopHandler,
        }
    }

    pub fn with_event_handler(mut self, handler: &'a dyn EventHandler) -> Self {
        self.event_handler = handler;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        self.history
    }

    /// Summarize `text`, score the result and record it in the history.
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let outcome = self.run(text).await;
        match &outcome {
            Ok(result) => {
                self.history.append(HistoryEntry::new(
                    text,
                    result.input_words,
                    result.summary.clone(),
                    result.summary_words,
                    self.history.config().input_preview_chars,
                ));
                self.event_handler.on_event(&PipelineEvent::Finished {
                    summary_words: result.summary_words,
                    input_words: result.input_words,
                });
            }
            Err(e) => {
                let message = e.to_string();
                self.event_handler
                    .on_event(&PipelineEvent::Failed { message: &message });
            }
        }
        outcome
    }

    /// Check that `text` is non-blank and long enough. Returns its word count.
    pub fn validate(&self, text: &str) -> Result<usize, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let words = word_count(text);
        if words < self.config.min_words {
            return Err(SummarizeError::InsufficientLength {
                actual: words,
                minimum: self.config.min_words,
            });
        }
        Ok(words)
    }

    async fn run(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let input_words = self.validate(text)?;

        let chunks = split_into_chunks(text, self.config.max_chunk_words);
        let total = chunks.len();
        self.event_handler.on_event(&PipelineEvent::Chunked {
            input_words,
            chunks: total,
        });

        let chunk_params = self.config.chunk_params();
        let mut partials = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            self.event_handler.on_event(&PipelineEvent::ChunkStarted {
                index: i + 1,
                total,
                words: word_count(chunk),
            });
            let partial = self
                .generator
                .generate(chunk, &chunk_params)
                .await
                .map_err(SummarizeError::Generation)?;
            self.event_handler.on_event(&PipelineEvent::ChunkSummarized {
                index: i + 1,
                total,
                summary: &partial,
            });
            partials.push(partial);
        }

        let combined = partials.join(" ");
        self.event_handler.on_event(&PipelineEvent::ChainStarted {
            combined_words: word_count(&combined),
        });
        let summary = self
            .generator
            .generate(&combined, &self.config.chain_params())
            .await
            .map_err(SummarizeError::Generation)?;

        let scores = self
            .scorer
            .score(&summary, text)
            .map_err(SummarizeError::Generation)?;

        Ok(SummaryResult {
            summary_words: word_count(&summary),
            summary,
            input_words,
            scores,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::generate::{GenerateFuture, GenerationParams};
    use crate::score::RougeScorer;
    use std::sync::Mutex;

    /// Records every call and returns the first `max_new_tokens / 10` words
    /// of its input, tagged with the call number.
    #[derive(Default)]
    pub(crate) struct RecordingGenerator {
        pub calls: Mutex<Vec<(String, GenerationParams)>>,
        /// Fail on this 1-based call number.
        pub fail_on: Option<usize>,
    }

    impl RecordingGenerator {
        pub fn failing_on(call: usize) -> Self {
            Self {
                fail_on: Some(call),
                ..Default::default()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Generator for RecordingGenerator {
        fn generate<'a>(
            &'a self,
            text: &'a str,
            params: &'a GenerationParams,
        ) -> GenerateFuture<'a> {
            Box::pin(async move {
                let n = {
                    let mut calls = self.calls.lock().unwrap();
                    calls.push((text.to_string(), params.clone()));
                    calls.len()
                };
                if self.fail_on == Some(n) {
                    return Err("model crashed".to_string());
                }
                let keep = (params.max_new_tokens / 10).max(1) as usize;
                let head: Vec<&str> = text.split_whitespace().take(keep).collect();
                Ok(format!("s{n} {}", head.join(" ")))
            })
        }
    }

    struct FailingScorer;

    impl Scorer for FailingScorer {
        fn score(&self, _: &str, _: &str) -> Result<OverlapScores, String> {
            Err("scorer unavailable".into())
        }
    }

    /// Records every `(candidate, reference)` pair and returns fixed scores.
    #[derive(Default)]
    struct RecordingScorer {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl Scorer for RecordingScorer {
        fn score(&self, candidate: &str, reference: &str) -> Result<OverlapScores, String> {
            self.calls
                .lock()
                .unwrap()
                .push((candidate.to_string(), reference.to_string()));
            Ok(OverlapScores::default())
        }
    }

    pub(crate) fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn temp_history() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::at(dir.path().join("summary_history.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_generation() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

        for input in ["", "   ", "\n\t  \n"] {
            let err = pipeline.summarize(input).await.unwrap_err();
            assert_eq!(err, SummarizeError::EmptyInput);
        }
        assert_eq!(generator.call_count(), 0);
        assert!(history.load().is_empty());
    }

    #[tokio::test]
    async fn short_input_reports_shortfall_without_generation() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

        let err = pipeline.summarize(&words(49)).await.unwrap_err();
        assert_eq!(
            err,
            SummarizeError::InsufficientLength {
                actual: 49,
                minimum: 50
            }
        );
        assert_eq!(err.shortfall(), 1);
        assert_eq!(generator.call_count(), 0);
        assert!(history.load().is_empty());
    }

    #[tokio::test]
    async fn sixty_words_make_two_generator_calls() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

        let input = words(60);
        let result = pipeline.summarize(&input).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert!(!result.summary.is_empty());
        assert_eq!(result.input_words, 60);
        assert_eq!(result.summary_words, word_count(&result.summary));
        for v in [result.scores.rouge1, result.scores.rouge2, result.scores.rouge_l] {
            assert!((0.0..=1.0).contains(&v));
        }

        // Chunk pass sees the input, chain pass sees the chunk pass output.
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls[0].0, input);
        assert_eq!(calls[0].1.max_new_tokens, 300);
        assert!(calls[1].0.starts_with("s1 "));
        assert_eq!(calls[1].1.max_new_tokens, 350);
        assert_eq!(calls[1].1.min_length, 100);
    }

    #[tokio::test]
    async fn chunk_calls_are_ceiling_plus_one_chain_call() {
        for (n_words, chunks) in [(50, 1), (400, 1), (401, 2), (1000, 3), (1600, 4)] {
            let (_dir, history) = temp_history();
            let generator = RecordingGenerator::default();
            let pipeline =
                Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

            pipeline.summarize(&words(n_words)).await.unwrap();

            let calls = generator.calls.lock().unwrap();
            assert_eq!(calls.len(), chunks + 1, "{n_words} words");
            let chunk_calls = calls.iter().filter(|(_, p)| p.max_new_tokens == 300).count();
            assert_eq!(chunk_calls, chunks);
            assert_eq!(calls.last().unwrap().1.max_new_tokens, 350);
        }
    }

    #[tokio::test]
    async fn chunk_summaries_are_joined_in_order() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let config = PipelineConfig::default()
            .with_min_words(1)
            .with_max_chunk_words(2)
            .with_chunk_profile(1, 10);
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, config);

        pipeline.summarize("a b c d e").await.unwrap();

        let calls = generator.calls.lock().unwrap();
        let inputs: Vec<&str> = calls.iter().map(|(t, _)| t.as_str()).collect();
        // Each chunk summary keeps one word: "s{n} {first word}".
        assert_eq!(inputs, vec!["a b", "c d", "e", "s1 a s2 c s3 e"]);
    }

    #[tokio::test]
    async fn success_appends_history_entry() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

        let input = words(120);
        let result = pipeline.summarize(&input).await.unwrap();

        let log = history.load();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].summary, result.summary);
        assert_eq!(log[0].summary_words, result.summary_words);
        assert_eq!(log[0].input_words, 120);
        assert!(log[0].input.ends_with("..."));
        assert_eq!(log[0].input.chars().count(), 203);
    }

    #[tokio::test]
    async fn generation_failure_is_contained() {
        for fail_on in [1, 2, 3] {
            let (_dir, history) = temp_history();
            let generator = RecordingGenerator::failing_on(fail_on);
            let pipeline =
                Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

            // 450 words: two chunk calls and a chain call.
            let err = pipeline.summarize(&words(450)).await.unwrap_err();
            assert_eq!(err, SummarizeError::Generation("model crashed".into()));
            assert_eq!(generator.call_count(), fail_on);
            assert!(history.load().is_empty());
        }
    }

    #[tokio::test]
    async fn scorer_failure_becomes_generation_error() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let pipeline =
            Pipeline::new(&generator, &FailingScorer, &history, PipelineConfig::default());

        let err = pipeline.summarize(&words(60)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error generating summary: scorer unavailable"
        );
        assert!(history.load().is_empty());
    }

    #[tokio::test]
    async fn scorer_compares_summary_against_raw_input() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let scorer = RecordingScorer::default();
        let pipeline = Pipeline::new(&generator, &scorer, &history, PipelineConfig::default());

        // Two chunks, with whitespace that chunking normalizes away.
        let input = format!("  {}\n\n{}  ", words(450), words(10));
        let result = pipeline.summarize(&input).await.unwrap();

        assert_eq!(generator.call_count(), 3);
        let calls = scorer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, result.summary);
        assert_eq!(calls[0].1, input);
    }

    #[tokio::test]
    async fn failed_request_leaves_prior_history_untouched() {
        let (_dir, history) = temp_history();
        let ok = RecordingGenerator::default();
        Pipeline::new(&ok, &RougeScorer, &history, PipelineConfig::default())
            .summarize(&words(60))
            .await
            .unwrap();
        let before = history.load();

        let broken = RecordingGenerator::failing_on(2);
        let _ = Pipeline::new(&broken, &RougeScorer, &history, PipelineConfig::default())
            .summarize(&words(60))
            .await;
        assert_eq!(history.load(), before);
    }

    #[tokio::test]
    async fn unwritable_history_does_not_fail_request() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = dir.path().join("occupied");
        std::fs::create_dir(&occupied).unwrap();
        let history = HistoryStore::at(&occupied);
        let generator = RecordingGenerator::default();
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default());

        let result = pipeline.summarize(&words(60)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn events_follow_the_run() {
        let (_dir, history) = temp_history();
        let generator = RecordingGenerator::default();
        let seen = Mutex::new(Vec::new());
        let handler = FnEventHandler::new(|event| {
            let tag = match event {
                PipelineEvent::Chunked { chunks, .. } => format!("chunked:{chunks}"),
                PipelineEvent::ChunkStarted { index, .. } => format!("start:{index}"),
                PipelineEvent::ChunkSummarized { index, .. } => format!("done:{index}"),
                PipelineEvent::ChainStarted { .. } => "chain".to_string(),
                PipelineEvent::Finished { .. } => "finished".to_string(),
                PipelineEvent::Failed { .. } => "failed".to_string(),
            };
            seen.lock().unwrap().push(tag);
        });
        let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default())
            .with_event_handler(&handler);

        pipeline.summarize(&words(500)).await.unwrap();
        pipeline.summarize("too short").await.unwrap_err();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "chunked:2", "start:1", "done:1", "start:2", "done:2", "chain", "finished",
                "failed",
            ]
        );
    }
}
