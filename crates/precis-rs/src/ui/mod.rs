//! Presentation layer for form-style frontends.
//!
//! Turns pipeline and history results into the plain strings a frontend
//! shows: the summary box, the word-count label, the score panel and the
//! history panel. No rendering dependencies; the `precis` binary prints these
//! strings, and any other frontend can do the same.
//!
//! Failures never escape this layer: a rejected or failed request yields its
//! error message in place of the summary and empty dependent fields.

pub mod samples;

pub use samples::{SAMPLE_ARTICLES, SampleArticle, find_sample};

use crate::history::HistoryStore;
use crate::pipeline::{Pipeline, word_count};
use crate::score::OverlapScores;

/// Status shown after the history has been cleared.
pub const HISTORY_CLEARED_MESSAGE: &str = "History cleared!";

/// Everything a form shows after a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitView {
    /// The summary, or the error message when the request failed.
    pub summary: String,
    /// `"Summary: N words"`, empty on failure.
    pub word_info: String,
    /// Score panel from [`score_display`], empty on failure.
    pub score_display: String,
    /// Refreshed history panel.
    pub history: String,
    /// Whether `summary` holds an error message.
    pub is_error: bool,
}

/// Run the pipeline on `text` and render the outcome.
pub async fn submit(pipeline: &Pipeline<'_>, text: &str) -> SubmitView {
    let outcome = pipeline.summarize(text).await;
    let history = pipeline.history().recent_formatted_default();
    match outcome {
        Ok(result) => SubmitView {
            word_info: format!("Summary: {} words", result.summary_words),
            score_display: score_display(&result.scores),
            summary: result.summary,
            history,
            is_error: false,
        },
        Err(e) => SubmitView {
            summary: e.to_string(),
            word_info: String::new(),
            score_display: String::new(),
            history,
            is_error: true,
        },
    }
}

/// Live word counter for the input box.
pub fn word_count_label(text: &str, min_words: usize) -> String {
    let count = word_count(text);
    if count < min_words {
        format!(
            "Words: {count}/{min_words} (need {} more)",
            min_words - count
        )
    } else {
        format!("Words: {count}/{min_words} ✓")
    }
}

/// Markdown score panel with three decimals per metric.
pub fn score_display(scores: &OverlapScores) -> String {
    format!(
        "**ROUGE Scores:**\n\
         ROUGE-1: {:.3}\n\
         ROUGE-2: {:.3}\n\
         ROUGE-L: {:.3}\n\
         \n\
         **Note:**\n\
         - ROUGE-1 → Word-level overlap\n\
         - ROUGE-2 → Bigram-level overlap\n\
         - ROUGE-L → Longest common subsequence overlap\n",
        scores.rouge1, scores.rouge2, scores.rouge_l
    )
}

/// Clear the history. Returns the status message and the refreshed panel.
pub fn clear_history(store: &HistoryStore) -> (String, String) {
    store.clear();
    (
        HISTORY_CLEARED_MESSAGE.to_string(),
        store.recent_formatted_default(),
    )
}
