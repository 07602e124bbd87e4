//! Summarize an article from the command line and manage the run history.
//!
//! Reads the API key from the `OPENROUTER_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # Summarize a file
//! precis summarize --file article.txt
//!
//! # Pipe content from stdin, with a different model
//! cat article.txt | precis summarize --stdin --model google/gemini-2.5-flash
//!
//! # Try a built-in sample
//! precis samples
//! precis summarize --sample "space exploration"
//!
//! # Recent runs, newest first
//! precis history --limit 5
//! precis clear-history
//! ```

use clap::{Args, Parser, Subcommand};
use precis_rs::history::{HistoryConfig, HistoryStore};
use precis_rs::pipeline::{EventHandler, Pipeline, PipelineConfig, PipelineEvent};
use precis_rs::prelude::{OpenRouterConfig, OpenRouterGenerator, RougeScorer};
use precis_rs::ui;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Chunk-and-chain article summarizer with ROUGE scoring.
#[derive(Parser)]
#[command(name = "precis")]
struct Cli {
    /// JSON file holding the run history
    #[arg(long, global = true, default_value = "summary_history.json")]
    history_file: PathBuf,

    /// Log pipeline progress and HTTP details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize an article and record the run
    Summarize(SummarizeArgs),
    /// Show the most recent runs, newest first
    History {
        /// Number of runs to show [default: 10]
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Delete the run history
    ClearHistory,
    /// List the built-in sample articles
    Samples,
    /// Count the words of an input against the minimum
    Count {
        #[command(flatten)]
        input: InputArgs,

        /// Minimum number of words
        #[arg(long, default_value_t = 50)]
        min_words: usize,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text to summarize
    #[arg(long)]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long)]
    stdin: bool,

    /// Use a built-in sample article (index or title)
    #[arg(long)]
    sample: Option<String>,
}

#[derive(Args)]
struct SummarizeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Model to summarize with
    #[arg(long, default_value = precis_rs::generate::openrouter::DEFAULT_MODEL)]
    model: String,

    /// Reject inputs shorter than this many words
    #[arg(long, default_value_t = 50)]
    min_words: usize,

    /// Maximum words per chunk
    #[arg(long, default_value_t = 400)]
    max_chunk_words: usize,

    /// Also print the history panel after the summary
    #[arg(long)]
    show_history: bool,
}

// ── Helpers ────────────────────────────────────────────────────────

fn read_input(args: &InputArgs) -> Result<String, String> {
    let sources = [
        args.text.is_some(),
        args.file.is_some(),
        args.stdin,
        args.sample.is_some(),
    ];
    if sources.iter().filter(|s| **s).count() > 1 {
        return Err("use only one of --text, --file, --stdin, --sample".to_string());
    }

    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {e}", path.display()));
    }
    if args.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        return Ok(buf);
    }
    if let Some(key) = &args.sample {
        return ui::find_sample(key)
            .map(|s| s.content.to_string())
            .ok_or_else(|| format!("no sample article named '{key}' (see `precis samples`)"));
    }
    Err("provide --text, --file, --stdin, or --sample".to_string())
}

/// Prints chunk progress to stderr.
struct CliEventHandler;

impl EventHandler for CliEventHandler {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::ChunkStarted {
                index,
                total,
                words,
            } => eprintln!("  [chunk {index}/{total}] {words} words"),
            PipelineEvent::ChainStarted { combined_words } => {
                eprintln!("  [chain] {combined_words} words")
            }
            _ => {}
        }
    }
}

async fn summarize(args: &SummarizeArgs, history: &HistoryStore) -> Result<(), String> {
    let text = read_input(&args.input)?;

    let generator =
        OpenRouterGenerator::from_env(OpenRouterConfig::default().with_model(&args.model))?;
    info!("Summarizing with {}", generator.model());
    let config = PipelineConfig::default()
        .with_min_words(args.min_words)
        .with_max_chunk_words(args.max_chunk_words);

    let handler = CliEventHandler;
    let pipeline =
        Pipeline::new(&generator, &RougeScorer, history, config).with_event_handler(&handler);

    let view = ui::submit(&pipeline, &text).await;
    if view.is_error {
        return Err(view.summary);
    }

    println!("{}\n", view.summary);
    println!("{}\n", view.word_info);
    print!("{}", view.score_display);
    if args.show_history {
        println!("\n{}", view.history);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), String> {
    let mut config = HistoryConfig::default().with_path(&cli.history_file);
    if let Command::History { limit: Some(limit) } = &cli.command {
        config = config.with_display_limit(*limit);
    }
    let history = HistoryStore::new(config);

    match &cli.command {
        Command::Summarize(args) => summarize(args, &history).await,
        Command::History { .. } => {
            println!("{}", history.recent_formatted_default());
            Ok(())
        }
        Command::ClearHistory => {
            let (status, _) = ui::clear_history(&history);
            println!("{status}");
            Ok(())
        }
        Command::Samples => {
            for (i, sample) in ui::SAMPLE_ARTICLES.iter().enumerate() {
                println!(
                    "{}. {} ({} words)",
                    i + 1,
                    sample.title,
                    precis_rs::word_count(sample.content)
                );
            }
            Ok(())
        }
        Command::Count { input, min_words } => {
            let text = read_input(input)?;
            println!("{}", ui::word_count_label(&text, *min_words));
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .with(level)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
