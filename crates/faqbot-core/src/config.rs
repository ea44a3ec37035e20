use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the faqbot application.
///
/// Loaded from `~/.faqbot/config.toml` by default. Each section corresponds
/// to one subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqbotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl FaqbotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FaqbotConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the knowledge base CSV and rendered audio.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.faqbot/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Knowledge base settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// CSV file with `question` and `answer` columns, relative to `data_dir`
    /// unless absolute.
    pub csv_path: String,
    /// Write the built-in default set to `csv_path` when the file is absent.
    pub write_default_if_missing: bool,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            csv_path: "faq.csv".to_string(),
            write_default_if_missing: true,
        }
    }
}

/// Text-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API style: "chat" (chat completions) or "completion" (legacy).
    pub api_style: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate per answer.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Caller-side request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_style: "chat".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 200,
            temperature: 0.2,
            request_timeout_secs: 30,
        }
    }
}

/// Speech transcription and synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether answers are rendered to audio.
    pub synthesis_enabled: bool,
    /// Base URL of the OpenAI-compatible audio API.
    pub base_url: String,
    /// Transcription model identifier.
    pub transcription_model: String,
    /// Synthesis model identifier.
    pub synthesis_model: String,
    /// Synthesis voice name.
    pub voice: String,
    /// Directory for rendered audio files, relative to `data_dir` unless
    /// absolute.
    pub output_dir: String,
    /// Caller-side request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            synthesis_enabled: true,
            base_url: "https://api.openai.com".to_string(),
            transcription_model: "whisper-1".to_string(),
            synthesis_model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            output_dir: "audio".to_string(),
            request_timeout_secs: 60,
        }
    }
}
