//! Configuration for the [`Pipeline`](super::Pipeline).
//!
//! # Examples
//!
//! ```ignore
//! let config = PipelineConfig::default()
//!     .with_min_words(80)
//!     .with_max_chunk_words(300);
//! ```

use crate::generate::GenerationParams;

/// Target output length for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    /// Minimum generated length, in tokens.
    pub min_length: u32,
    /// Maximum newly generated tokens.
    pub max_new_tokens: u32,
}

/// Beam-search controls shared by both passes.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingConfig {
    pub num_beams: u32,
    pub length_penalty: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            num_beams: 6,
            length_penalty: 1.0,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: 3,
        }
    }
}

/// Validation and chunk-and-chain settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Inputs with fewer words are rejected. Default: `50`.
    pub min_words: usize,
    /// Maximum words per chunk. Default: `400`.
    pub max_chunk_words: usize,
    /// Length profile for each per-chunk pass. Default: 80 / 300.
    pub chunk_profile: LengthProfile,
    /// Length profile for the final chain pass. Default: 100 / 350.
    pub chain_profile: LengthProfile,
    pub decoding: DecodingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_words: 50,
            max_chunk_words: 400,
            chunk_profile: LengthProfile {
                min_length: 80,
                max_new_tokens: 300,
            },
            chain_profile: LengthProfile {
                min_length: 100,
                max_new_tokens: 350,
            },
            decoding: DecodingConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    pub fn with_max_chunk_words(mut self, max_chunk_words: usize) -> Self {
        self.max_chunk_words = max_chunk_words;
        self
    }

    pub fn with_chunk_profile(mut self, min_length: u32, max_new_tokens: u32) -> Self {
        self.chunk_profile = LengthProfile {
            min_length,
            max_new_tokens,
        };
        self
    }

    pub fn with_chain_profile(mut self, min_length: u32, max_new_tokens: u32) -> Self {
        self.chain_profile = LengthProfile {
            min_length,
            max_new_tokens,
        };
        self
    }

    /// Generation parameters for a per-chunk pass.
    pub fn chunk_params(&self) -> GenerationParams {
        self.params_for(self.chunk_profile)
    }

    /// Generation parameters for the chain pass.
    pub fn chain_params(&self) -> GenerationParams {
        self.params_for(self.chain_profile)
    }

    fn params_for(&self, profile: LengthProfile) -> GenerationParams {
        GenerationParams {
            min_length: profile.min_length,
            max_new_tokens: profile.max_new_tokens,
            num_beams: self.decoding.num_beams,
            length_penalty: self.decoding.length_penalty,
            repetition_penalty: self.decoding.repetition_penalty,
            no_repeat_ngram_size: self.decoding.no_repeat_ngram_size,
        }
    }
}
