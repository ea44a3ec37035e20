use thiserror::Error;

/// Top-level error type for the faqbot system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for FaqbotError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FaqbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("Knowledge schema error: {0}")]
    Schema(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FaqbotError {
    fn from(err: toml::de::Error) -> Self {
        FaqbotError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FaqbotError {
    fn from(err: toml::ser::Error) -> Self {
        FaqbotError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FaqbotError {
    fn from(err: serde_json::Error) -> Self {
        FaqbotError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for faqbot operations.
pub type Result<T> = std::result::Result<T, FaqbotError>;
