//! Text-to-speech synthesis.
//!
//! Request/response over the full answer text: the synthesizer returns the
//! path of a rendered audio file suitable for playback. No streaming.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use faqbot_core::FaqbotError;
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Errors from speech synthesis.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to write audio file: {0}")]
    Io(String),
}

impl From<SynthesisError> for FaqbotError {
    fn from(err: SynthesisError) -> Self {
        FaqbotError::Synthesis(err.to_string())
    }
}

/// Service rendering answer text to an audio file.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<PathBuf, SynthesisError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// Synthesizer backed by an OpenAI-style `/v1/audio/speech` endpoint.
///
/// Writes the returned mp3 bytes under `output_dir` and hands back the
/// file path.
pub struct HttpSynthesizer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
    output_dir: PathBuf,
}

impl HttpSynthesizer {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SynthesisError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            voice: voice.into(),
            output_dir: output_dir.into(),
        })
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/audio/speech", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct SpeechRequest {
    model: String,
    voice: String,
    input: String,
    response_format: String,
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<PathBuf, SynthesisError> {
        let request = SpeechRequest {
            model: self.model.clone(),
            voice: self.voice.clone(),
            input: text.to_string(),
            response_format: "mp3".to_string(),
        };

        tracing::debug!(voice = %self.voice, text_len = text.len(), "Synthesis request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        let path = write_answer_audio(&self.output_dir, &bytes)?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Answer audio written");
        Ok(path)
    }
}

/// Write rendered audio bytes under `output_dir` as a uniquely named mp3,
/// creating the directory if needed.
fn write_answer_audio(output_dir: &Path, bytes: &[u8]) -> Result<PathBuf, SynthesisError> {
    std::fs::create_dir_all(output_dir).map_err(|e| SynthesisError::Io(e.to_string()))?;
    let path = output_dir.join(format!("response-{}.mp3", Uuid::new_v4()));
    std::fs::write(&path, bytes).map_err(|e| SynthesisError::Io(e.to_string()))?;
    Ok(path)
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock synthesizer that records the last text and returns a fixed path.
pub struct MockSynthesizer {
    path: PathBuf,
    last_text: Mutex<Option<String>>,
}

impl MockSynthesizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_text: Mutex::new(None),
        }
    }

    /// The text most recently passed to `synthesize`, if any.
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().ok().and_then(|t| t.clone())
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<PathBuf, SynthesisError> {
        if let Ok(mut last) = self.last_text.lock() {
            *last = Some(text.to_string());
        }
        Ok(self.path.clone())
    }
}

/// True if `path` looks like a playable audio artifact.
pub fn is_audio_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("mp3") | Some("wav") | Some("ogg")
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_synthesizer_endpoint() {
        let s = HttpSynthesizer::new(
            "sk-test",
            "tts-1",
            "alloy",
            "/tmp/audio",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(s.endpoint(), "https://api.openai.com/v1/audio/speech");
    }

    #[test]
    fn test_http_synthesizer_custom_base_url() {
        let s = HttpSynthesizer::new(
            "sk-test",
            "tts-1",
            "alloy",
            "/tmp/audio",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url("http://localhost:8080/");
        assert_eq!(s.endpoint(), "http://localhost:8080/v1/audio/speech");
    }

    #[test]
    fn test_write_answer_audio_creates_mp3_under_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_answer_audio(dir.path(), b"fake mp3 bytes").unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(is_audio_file(&path));
        assert_eq!(std::fs::read(&path).unwrap(), b"fake mp3 bytes");
    }

    #[test]
    fn test_write_answer_audio_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("audio").join("out");
        let path = write_answer_audio(&nested, b"x").unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_write_answer_audio_paths_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_answer_audio(dir.path(), b"a").unwrap();
        let b = write_answer_audio(dir.path(), b"b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_speech_request_serialization() {
        let request = SpeechRequest {
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            input: "Our office is open from 9 AM to 6 PM.".to_string(),
            response_format: "mp3".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "tts-1");
        assert_eq!(value["voice"], "alloy");
        assert_eq!(value["response_format"], "mp3");
        assert!(value["input"].as_str().unwrap().contains("9 AM"));
    }

    #[test]
    fn test_synthesis_error_display() {
        let err = SynthesisError::Api {
            status: 401,
            message: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 401): invalid key");
    }

    #[test]
    fn test_synthesis_error_converts_to_faqbot_error() {
        let err: FaqbotError = SynthesisError::Io("disk full".to_string()).into();
        assert!(matches!(err, FaqbotError::Synthesis(_)));
    }

    #[tokio::test]
    async fn test_mock_synthesizer_returns_path_and_records_text() {
        let s = MockSynthesizer::new("/tmp/response.mp3");
        assert!(s.last_text().is_none());

        let path = s.synthesize("Hello there.").await.unwrap();
        assert_eq!(path, PathBuf::from("/tmp/response.mp3"));
        assert_eq!(s.last_text().as_deref(), Some("Hello there."));
    }

    #[tokio::test]
    async fn test_mock_synthesizer_through_trait_object() {
        let s: Box<dyn SpeechSynthesizer> = Box::new(MockSynthesizer::new("/tmp/out.mp3"));
        let path = s.synthesize("text").await.unwrap();
        assert!(is_audio_file(&path));
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("response.mp3")));
        assert!(is_audio_file(Path::new("clip.wav")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("noextension")));
    }
}
