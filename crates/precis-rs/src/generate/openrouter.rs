//! HTTP-backed [`Generator`] on top of the OpenRouter chat completions API.
//!
//! Every call is a single, self-contained chat request: a fixed
//! summarization system prompt plus the text to condense. Decoding is
//! pinned to temperature 0 with a fixed seed so that repeated calls with the
//! same input produce the same summary.

use super::{GenerateFuture, GenerationParams, Generator};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for summarization calls.
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

/// Fixed sampling seed sent with every request.
const DETERMINISTIC_SEED: u64 = 1334;

const SUMMARIZATION_PROMPT: &str = "\
You are a news-article summarizer. Condense the text the user sends into a \
single abridged passage of plain prose.

Rules:
- Only include facts stated in the text. Do not infer or extrapolate.
- Keep names, figures and places verbatim.
- Do not repeat the same phrase or sentence.
- No headings, bullet points, preamble or commentary. Output only the summary.";

// ── Configuration ──────────────────────────────────────────────────

/// Connection settings for [`OpenRouterGenerator`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Value of the `HTTP-Referer` header.
    pub referer: String,
    /// Value of the `X-Title` header.
    pub title: String,
    /// Per-request HTTP timeout. Default: 120 seconds.
    pub timeout: Duration,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            referer: "https://crates.io/crates/precis-rs".to_string(),
            title: "precis-rs".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl OpenRouterConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: Role,
    content: String,
}

/// Chat completion request body. Only the fields this generator sets.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f32>,
}

#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

#[derive(Deserialize, Debug)]
struct UsageInfo {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

// ── Generator ──────────────────────────────────────────────────────

/// A [`Generator`] that summarizes through an OpenRouter-hosted model.
pub struct OpenRouterGenerator {
    client: reqwest::Client,
    api_key: String,
    config: OpenRouterConfig,
}

impl OpenRouterGenerator {
    /// Create a generator with the given API key and configuration.
    pub fn new(api_key: impl Into<String>, config: OpenRouterConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent("precis-rs/0.1")
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create a generator reading the key from the `OPENROUTER_KEY` environment variable.
    pub fn from_env(config: OpenRouterConfig) -> Result<Self, String> {
        let api_key = std::env::var("OPENROUTER_KEY")
            .map_err(|_| "OPENROUTER_KEY environment variable is not set".to_string())?;
        Self::new(api_key, config)
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, text: &str, params: &GenerationParams) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SUMMARIZATION_PROMPT.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: build_user_prompt(text, params),
                },
            ],
            max_tokens: params.max_new_tokens,
            temperature: 0.0,
            seed: DETERMINISTIC_SEED,
            repetition_penalty: (params.repetition_penalty != 1.0)
                .then_some(params.repetition_penalty),
        }
    }

    async fn complete(&self, body: &ChatRequest) -> Result<String, String> {
        debug!(
            "Generation request: model={}, max_tokens={}, input_chars={}",
            body.model,
            body.max_tokens,
            body.messages.last().map_or(0, |m| m.content.len()),
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();
        let resp = self
            .client
            .post(OPENROUTER_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;
        debug!(
            "Generation response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(format!("OpenRouter API HTTP {status}: {text}"));
        }
        parse_completion(&text)
    }
}

impl Generator for OpenRouterGenerator {
    fn generate<'a>(&'a self, text: &'a str, params: &'a GenerationParams) -> GenerateFuture<'a> {
        Box::pin(async move {
            let body = self.build_request(text, params);
            self.complete(&body).await
        })
    }
}

/// User message for one generation call. The model has no native
/// `min_length`, so the length window is stated in the prompt.
fn build_user_prompt(text: &str, params: &GenerationParams) -> String {
    format!(
        "Summarize the following text in at least {} and at most {} tokens.\n\n{text}",
        params.min_length, params.max_new_tokens
    )
}

fn parse_completion(body: &str) -> Result<String, String> {
    let parsed: RawChatResponse =
        serde_json::from_str(body).map_err(|e| format!("failed to parse response: {e}"))?;

    if let Some(err) = parsed.error {
        return Err(format!("OpenRouter API error: {}", err.message));
    }

    if let Some(ref usage) = parsed.usage {
        debug!(
            "Token usage: prompt={}, completion={}",
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
        );
    }

    parsed
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "model returned an empty summary".to_string())
}
