//! Speech-to-text transcription.
//!
//! Transcription failures are expected, recoverable conditions: callers get
//! a distinguished failure kind with a fixed user-visible message, never a
//! raised fault. A failed transcription means *no query was captured*: the
//! notice is surfaced to the user and nothing is logged as their message.

use async_trait::async_trait;
use faqbot_core::FaqbotError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Fixed notice for audio the service could not make sense of.
pub const UNINTELLIGIBLE_NOTICE: &str = "⚠️ Sorry, could not understand audio.";

/// Fixed notice for an unreachable or failing transcription service.
pub const SERVICE_UNAVAILABLE_NOTICE: &str = "⚠️ Speech recognition service unavailable.";

/// The two distinguished transcription failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionFailure {
    #[error("could not understand audio")]
    Unintelligible,
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl TranscriptionFailure {
    /// The fixed user-visible notice for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            TranscriptionFailure::Unintelligible => UNINTELLIGIBLE_NOTICE,
            TranscriptionFailure::ServiceUnavailable(_) => SERVICE_UNAVAILABLE_NOTICE,
        }
    }
}

impl From<TranscriptionFailure> for FaqbotError {
    fn from(err: TranscriptionFailure) -> Self {
        FaqbotError::Transcription(err.to_string())
    }
}

/// Service for transcribing captured audio into text.
///
/// `audio` is the raw bytes of an uploaded file in a common container
/// format (wav, mp3, ...); `file_name` carries the extension the service
/// uses to pick a decoder.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], file_name: &str)
        -> Result<String, TranscriptionFailure>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// Transcriber backed by an OpenAI-style `/v1/audio/transcriptions` endpoint.
pub struct HttpTranscriber {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl HttpTranscriber {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionFailure::ServiceUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        })
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        file_name: &str,
    ) -> Result<String, TranscriptionFailure> {
        if audio.is_empty() {
            return Err(TranscriptionFailure::Unintelligible);
        }

        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", Part::bytes(audio.to_vec()).file_name(file_name.to_string()));

        tracing::debug!(bytes = audio.len(), file = %file_name, "Transcription request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let description = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                };
                TranscriptionFailure::ServiceUnavailable(description)
            })?;

        let status = response.status();
        if !status.is_success() {
            // The service rejects audio it cannot decode with a client error;
            // everything else counts as the service being unavailable.
            if status.is_client_error() && status != reqwest::StatusCode::UNAUTHORIZED {
                tracing::debug!(status = status.as_u16(), "Audio rejected by service");
                return Err(TranscriptionFailure::Unintelligible);
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(TranscriptionFailure::ServiceUnavailable(format!(
                "status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionFailure::ServiceUnavailable(e.to_string()))?;

        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptionFailure::Unintelligible);
        }
        Ok(text)
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock transcriber returning a canned transcript or failure.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    result: Result<String, TranscriptionFailure>,
}

impl MockTranscriber {
    /// Mock that transcribes everything to `text`.
    pub fn with_transcript(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
        }
    }

    /// Mock that always fails as unintelligible audio.
    pub fn unintelligible() -> Self {
        Self {
            result: Err(TranscriptionFailure::Unintelligible),
        }
    }

    /// Mock that always fails as service-unavailable.
    pub fn unavailable(description: impl Into<String>) -> Self {
        Self {
            result: Err(TranscriptionFailure::ServiceUnavailable(description.into())),
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _file_name: &str,
    ) -> Result<String, TranscriptionFailure> {
        self.result.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_user_messages_are_fixed() {
        assert_eq!(
            TranscriptionFailure::Unintelligible.user_message(),
            "⚠️ Sorry, could not understand audio."
        );
        assert_eq!(
            TranscriptionFailure::ServiceUnavailable("dns error".to_string()).user_message(),
            "⚠️ Speech recognition service unavailable."
        );
    }

    #[test]
    fn test_failure_display() {
        let err = TranscriptionFailure::Unintelligible;
        assert_eq!(err.to_string(), "could not understand audio");

        let err = TranscriptionFailure::ServiceUnavailable("timeout".to_string());
        assert_eq!(
            err.to_string(),
            "speech recognition service unavailable: timeout"
        );
    }

    #[test]
    fn test_failure_converts_to_faqbot_error() {
        let err: FaqbotError = TranscriptionFailure::Unintelligible.into();
        assert!(matches!(err, FaqbotError::Transcription(_)));
    }

    #[test]
    fn test_http_transcriber_endpoint() {
        let t = HttpTranscriber::new("sk-test", "whisper-1", Duration::from_secs(5)).unwrap();
        assert_eq!(
            t.endpoint(),
            "https://api.openai.com/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_http_transcriber_custom_base_url() {
        let t = HttpTranscriber::new("sk-test", "whisper-1", Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(t.endpoint(), "http://localhost:8080/v1/audio/transcriptions");
    }

    #[tokio::test]
    async fn test_http_transcriber_empty_audio_is_unintelligible() {
        let t = HttpTranscriber::new("sk-test", "whisper-1", Duration::from_secs(5)).unwrap();
        let result = t.transcribe(&[], "query.wav").await;
        assert_eq!(result.unwrap_err(), TranscriptionFailure::Unintelligible);
    }

    #[test]
    fn test_transcription_response_deserialization() {
        let json = r#"{"text": "How can I reset my password?"}"#;
        let parsed: TranscriptionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text, "How can I reset my password?");
    }

    #[tokio::test]
    async fn test_mock_transcriber_transcript() {
        let t = MockTranscriber::with_transcript("hello there");
        let text = t.transcribe(&[1, 2, 3], "query.wav").await.unwrap();
        assert_eq!(text, "hello there");
    }

    #[tokio::test]
    async fn test_mock_transcriber_unintelligible() {
        let t = MockTranscriber::unintelligible();
        let err = t.transcribe(&[1, 2, 3], "query.wav").await.unwrap_err();
        assert_eq!(err, TranscriptionFailure::Unintelligible);
        assert_eq!(err.user_message(), UNINTELLIGIBLE_NOTICE);
    }

    #[tokio::test]
    async fn test_mock_transcriber_unavailable() {
        let t = MockTranscriber::unavailable("connection refused");
        let err = t.transcribe(&[1, 2, 3], "query.wav").await.unwrap_err();
        assert!(matches!(err, TranscriptionFailure::ServiceUnavailable(_)));
        assert_eq!(err.user_message(), SERVICE_UNAVAILABLE_NOTICE);
    }

    #[tokio::test]
    async fn test_mock_transcriber_through_trait_object() {
        let t: Box<dyn Transcriber> = Box::new(MockTranscriber::with_transcript("dyn ok"));
        let text = t.transcribe(&[0], "query.wav").await.unwrap();
        assert_eq!(text, "dyn ok");
    }
}
