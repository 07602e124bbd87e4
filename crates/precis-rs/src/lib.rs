//! Chunk-and-chain article summarizer with ROUGE scoring and a rolling run history.
//!
//! `precis-rs` condenses a block of prose with a sequence-to-sequence model,
//! scores the result against the source, and keeps a small on-disk log of
//! past runs. The core abstraction is the [`Pipeline`](pipeline::Pipeline):
//! it splits long input into fixed-size word chunks, summarizes each chunk,
//! joins the partial summaries, and summarizes the join once more to get a
//! single coherent result.
//!
//! The model and the scorer are injected collaborators. Anything that
//! implements [`Generator`](generate::Generator) can stand in for the model;
//! [`OpenRouterGenerator`](generate::OpenRouterGenerator) is the bundled
//! HTTP implementation and [`RougeScorer`](score::RougeScorer) the bundled
//! scorer.
//!
//! # Getting started
//!
//! ```ignore
//! use precis_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let generator = OpenRouterGenerator::from_env(OpenRouterConfig::default())?;
//!     let history = HistoryStore::default();
//!
//!     let pipeline = Pipeline::new(&generator, &RougeScorer, &history, PipelineConfig::default())
//!         .with_event_handler(&LoggingHandler);
//!
//!     let article = std::fs::read_to_string("article.txt").map_err(|e| e.to_string())?;
//!     match pipeline.summarize(&article).await {
//!         Ok(result) => {
//!             println!("{}", result.summary);
//!             println!("ROUGE-1 {:.3}", result.scores.rouge1);
//!         }
//!         Err(e) => eprintln!("{e}"),
//!     }
//!
//!     println!("{}", history.recent_formatted(10));
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pipeline`] | [`Pipeline`](pipeline::Pipeline), chunking, config, progress events |
//! | [`generate`] | [`Generator`](generate::Generator) trait, OpenRouter-backed implementation |
//! | [`score`] | [`Scorer`](score::Scorer) trait, ROUGE-1/2/L |
//! | [`history`] | [`HistoryStore`](history::HistoryStore): capped JSON run log |
//! | [`ui`] | Form-style rendering of results, word counter, sample articles |
//! | [`error`] | [`SummarizeError`], [`HistoryError`](error::HistoryError) |

pub mod error;
pub mod generate;
pub mod history;
pub mod pipeline;
pub mod prelude;
pub mod score;
pub mod ui;

pub use error::SummarizeError;
pub use pipeline::{split_into_chunks, word_count};
