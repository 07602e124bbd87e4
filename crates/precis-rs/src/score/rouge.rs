//! ROUGE-N and ROUGE-L F-measures.
//!
//! Tokenization follows the usual ROUGE convention: lowercase, replace every
//! character outside `[a-z0-9]` with a space, split on whitespace. No
//! stemming and no stopword removal.

use super::{OverlapScores, Scorer};
use std::collections::HashMap;

/// Built-in ROUGE scorer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RougeScorer;

impl Scorer for RougeScorer {
    fn score(&self, candidate: &str, reference: &str) -> Result<OverlapScores, String> {
        let cand = tokenize(candidate);
        let refr = tokenize(reference);
        Ok(OverlapScores {
            rouge1: rouge_n(&cand, &refr, 1),
            rouge2: rouge_n(&cand, &refr, 2),
            rouge_l: rouge_l(&cand, &refr),
        })
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    normalized.split_whitespace().map(str::to_string).collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

fn f_measure(overlap: usize, candidate_total: usize, reference_total: usize) -> f64 {
    if candidate_total == 0 || reference_total == 0 {
        return 0.0;
    }
    let precision = overlap as f64 / candidate_total as f64;
    let recall = overlap as f64 / reference_total as f64;
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// ROUGE-N F-measure with clipped n-gram counts.
pub fn rouge_n(candidate: &[String], reference: &[String], n: usize) -> f64 {
    let cand = ngram_counts(candidate, n);
    let refr = ngram_counts(reference, n);

    let overlap: usize = cand
        .iter()
        .map(|(gram, &count)| count.min(refr.get(gram).copied().unwrap_or(0)))
        .sum();

    f_measure(overlap, cand.values().sum(), refr.values().sum())
}

/// ROUGE-L F-measure from the token-level longest common subsequence.
pub fn rouge_l(candidate: &[String], reference: &[String]) -> f64 {
    let lcs = lcs_len(candidate, reference);
    f_measure(lcs, candidate.len(), reference.len())
}

/// Two-row dynamic program; memory is linear in the reference length.
fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(
            toks("The Cat's hat, 2024-edition!"),
            vec!["the", "cat", "s", "hat", "2024", "edition"]
        );
    }

    #[test]
    fn identical_texts_score_one() {
        let scores = RougeScorer
            .score("the quick brown fox", "The quick brown fox.")
            .unwrap();
        assert!((scores.rouge1 - 1.0).abs() < 1e-9);
        assert!((scores.rouge2 - 1.0).abs() < 1e-9);
        assert!((scores.rouge_l - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        let scores = RougeScorer.score("alpha beta", "gamma delta").unwrap();
        assert_eq!(scores, OverlapScores::default());
    }

    #[test]
    fn empty_candidate_scores_zero() {
        let scores = RougeScorer.score("", "some reference text").unwrap();
        assert_eq!(scores, OverlapScores::default());
    }

    #[test]
    fn rouge1_clips_repeated_tokens() {
        // candidate "the the the" vs reference "the cat": overlap is clipped to 1.
        let f = rouge_n(&toks("the the the"), &toks("the cat"), 1);
        let p = 1.0 / 3.0;
        let r = 1.0 / 2.0;
        assert!((f - 2.0 * p * r / (p + r)).abs() < 1e-9);
    }

    #[test]
    fn rouge2_partial_overlap() {
        // bigrams: cand {a b, b c}, ref {a b, b d}: one shared.
        let f = rouge_n(&toks("a b c"), &toks("a b d"), 2);
        assert!((f - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rouge_l_uses_subsequence_not_contiguity() {
        // LCS of "a c e" in "a b c d e" is 3.
        assert_eq!(lcs_len(&toks("a c e"), &toks("a b c d e")), 3);
        let f = rouge_l(&toks("a c e"), &toks("a b c d e"));
        let p = 1.0;
        let r = 3.0 / 5.0;
        assert!((f - 2.0 * p * r / (p + r)).abs() < 1e-9);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let scores = RougeScorer
            .score(
                "storms and flooding grow more common",
                "Extreme weather events, including storms, droughts and flooding, are more common.",
            )
            .unwrap();
        for v in [scores.rouge1, scores.rouge2, scores.rouge_l] {
            assert!((0.0..=1.0).contains(&v), "{v} out of range");
        }
    }
}
