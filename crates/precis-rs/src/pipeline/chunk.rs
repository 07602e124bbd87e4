//! Word counting and fixed-size word chunking.
//!
//! A "word" is a maximal run of non-whitespace characters. Chunking keeps
//! every word byte-for-byte and in order; only the whitespace between words
//! is normalized to a single space.

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split `text` into chunks of at most `max_words` words each.
///
/// The last chunk may be shorter. Text with no words yields no chunks. A
/// `max_words` of zero is treated as one.
pub fn split_into_chunks(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}
