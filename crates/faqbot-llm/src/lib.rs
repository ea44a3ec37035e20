//! Text-generation capability for faqbot.
//!
//! Defines the [`TextGenerator`] trait ("grounding + query in, text out")
//! with two HTTP implementations against OpenAI-style endpoints (chat
//! completions and the legacy completions API) plus a mock for testing.
//! The concrete implementation is selected once at startup from
//! configuration, never probed at call time.

pub mod chat;
pub mod completion;

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use faqbot_core::config::GenerationConfig;
use faqbot_core::FaqbotError;
use serde::Deserialize;

pub use chat::ChatCompletionGenerator;
pub use completion::CompletionGenerator;

/// Errors from the text-generation capability.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("unknown API style: {0} (expected \"chat\" or \"completion\")")]
    UnknownStyle(String),
}

impl From<GenerationError> for FaqbotError {
    fn from(err: GenerationError) -> Self {
        FaqbotError::Generation(err.to_string())
    }
}

/// Which OpenAI-style endpoint to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStyle {
    /// `POST /v1/chat/completions`.
    Chat,
    /// `POST /v1/completions` (legacy).
    Completion,
}

impl FromStr for ApiStyle {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(ApiStyle::Chat),
            "completion" => Ok(ApiStyle::Completion),
            other => Err(GenerationError::UnknownStyle(other.to_string())),
        }
    }
}

/// Service that turns a grounding instruction plus a user prompt into
/// generated text.
///
/// One call per invocation; no retries. Implementations are selected at
/// startup and shared read-only afterwards.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Build the configured generator.
///
/// `generation.api_style` picks the implementation; an unknown value is a
/// startup error, not a silent fallback.
pub fn generator_from_config(
    config: &GenerationConfig,
    api_key: &str,
) -> Result<Box<dyn TextGenerator>, GenerationError> {
    let style = config.api_style.parse::<ApiStyle>()?;
    let timeout = Duration::from_secs(config.request_timeout_secs);
    match style {
        ApiStyle::Chat => Ok(Box::new(
            ChatCompletionGenerator::new(api_key, &config.model, timeout)?
                .with_base_url(&config.base_url)
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature),
        )),
        ApiStyle::Completion => Ok(Box::new(
            CompletionGenerator::new(api_key, &config.model, timeout)?
                .with_base_url(&config.base_url)
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature),
        )),
    }
}

// =============================================================================
// Shared HTTP helpers
// =============================================================================

#[derive(Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorBody,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
}

/// Short human description of a transport-level failure.
pub(crate) fn describe_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

/// Map a non-success HTTP status plus body into a [`GenerationError::Api`],
/// extracting the API's own error message when the body is the usual
/// `{"error": {"message": ...}}` wrapper.
pub(crate) fn parse_api_error(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());
    GenerationError::Api { status, message }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock generator returning a canned reply or a forced failure.
///
/// Counts invocations so tests can assert the generator was (or was not)
/// called.
#[derive(Debug, Default)]
pub struct MockTextGenerator {
    reply: String,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockTextGenerator {
    /// Mock that always succeeds with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock that always fails with the given description.
    pub fn failing(description: impl Into<String>) -> Self {
        Self {
            reply: String::new(),
            failure: Some(description.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(description) => Err(GenerationError::Http(description.clone())),
            None => Ok(self.reply.clone()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
