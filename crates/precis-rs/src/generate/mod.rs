//! Text-to-text generation: the [`Generator`] capability and its parameters.
//!
//! The pipeline never talks to a model directly. It receives a
//! `&dyn Generator` at construction time and calls
//! [`Generator::generate`] once per chunk plus once for the chain pass.
//!
//! - [`openrouter`]: [`OpenRouterGenerator`], an HTTP-backed implementation
//!   on top of the OpenRouter chat completions API.
//!
//! Tests substitute their own implementations; see the fakes in
//! [`crate::pipeline`].

pub mod openrouter;

pub use openrouter::{OpenRouterConfig, OpenRouterGenerator};

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Generator::generate`].
///
/// `Err` carries a human-readable message that the pipeline wraps into
/// [`SummarizeError::Generation`](crate::SummarizeError::Generation).
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

/// Length and decoding controls for a single generation call.
///
/// Decoding is always deterministic: identical text and parameters must
/// yield identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Minimum length of the generated text, in tokens.
    pub min_length: u32,
    /// Maximum number of newly generated tokens.
    pub max_new_tokens: u32,
    /// Beam width for beam-search decoding.
    pub num_beams: u32,
    /// Exponential length penalty applied to beam scores (1.0 = neutral).
    pub length_penalty: f32,
    /// Penalty multiplier for already generated tokens (1.0 = none).
    pub repetition_penalty: f32,
    /// Forbid repeating any n-gram of this size (0 = disabled).
    pub no_repeat_ngram_size: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            min_length: 100,
            max_new_tokens: 400,
            num_beams: 6,
            length_penalty: 1.0,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: 3,
        }
    }
}

/// A text-to-text summarization model.
///
/// Implementations must be stateless across calls: the pipeline relies on
/// every call being independent of the ones before it.
///
/// # Example
///
/// ```ignore
/// struct FirstWords;
///
/// impl Generator for FirstWords {
///     fn generate<'a>(&'a self, text: &'a str, params: &'a GenerationParams) -> GenerateFuture<'a> {
///         Box::pin(async move {
///             let n = params.max_new_tokens as usize;
///             Ok(text.split_whitespace().take(n).collect::<Vec<_>>().join(" "))
///         })
///     }
/// }
/// ```
pub trait Generator: Send + Sync {
    /// Produce a summary of `text` under the given length controls.
    fn generate<'a>(&'a self, text: &'a str, params: &'a GenerationParams) -> GenerateFuture<'a>;
}
