//! Overlap scoring between a generated summary and its source text.
//!
//! - [`rouge`]: [`RougeScorer`], the built-in ROUGE-1 / ROUGE-2 / ROUGE-L
//!   implementation.

pub mod rouge;

pub use rouge::RougeScorer;

/// F-measures of one candidate against one reference, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlapScores {
    /// Unigram overlap (ROUGE-1).
    pub rouge1: f64,
    /// Bigram overlap (ROUGE-2).
    pub rouge2: f64,
    /// Longest-common-subsequence overlap (ROUGE-L).
    pub rouge_l: f64,
}

/// Scores a candidate text against a reference text.
pub trait Scorer: Send + Sync {
    fn score(&self, candidate: &str, reference: &str) -> Result<OverlapScores, String>;
}
