//! Legacy completions generator: `POST /v1/completions`.
//!
//! The grounding instruction and user prompt are flattened into a single
//! prompt string, since the legacy API has no message roles.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{describe_request_error, parse_api_error, GenerationError, TextGenerator};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Generator backed by an OpenAI-style legacy completions endpoint.
#[derive(Debug)]
pub struct CompletionGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl CompletionGenerator {
    /// Create a generator with the given credential, model, and caller-side
    /// request timeout.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            max_tokens: None,
            temperature: None,
        })
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for CompletionGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: flatten_prompt(system, prompt),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, prompt_len = request.prompt.len(), "Completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Http(describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Http(format!("failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Fold the system instruction and user prompt into one legacy prompt.
fn flatten_prompt(system: &str, prompt: &str) -> String {
    if system.is_empty() {
        prompt.to_string()
    } else {
        format!("{system}\n\n{prompt}")
    }
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> CompletionGenerator {
        CompletionGenerator::new("sk-test", "gpt-3.5-turbo-instruct", Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn test_endpoint_default_base_url() {
        let gen = generator();
        assert_eq!(gen.endpoint(), "https://api.openai.com/v1/completions");
    }

    #[test]
    fn test_endpoint_custom_base_url() {
        let gen = generator().with_base_url("http://localhost:8080");
        assert_eq!(gen.endpoint(), "http://localhost:8080/v1/completions");
    }

    #[test]
    fn test_flatten_prompt_with_system() {
        let flat = flatten_prompt("You are an FAQ chatbot.", "What are your hours?");
        assert_eq!(flat, "You are an FAQ chatbot.\n\nWhat are your hours?");
    }

    #[test]
    fn test_flatten_prompt_empty_system() {
        let flat = flatten_prompt("", "What are your hours?");
        assert_eq!(flat, "What are your hours?");
    }

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo-instruct".to_string(),
            prompt: "hello".to_string(),
            max_tokens: Some(120),
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(value["prompt"], "hello");
        assert_eq!(value["max_tokens"], 120);
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices": [{"text": " Answer text. "}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].text, " Answer text. ");
    }

    #[test]
    fn test_response_deserialization_no_choices() {
        let json = r#"{"choices": []}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
