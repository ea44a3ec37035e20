//! Knowledge base for the faqbot assistant.
//!
//! Loads question/answer pairs from a CSV file (UTF-8, columns `question`
//! and `answer`), falls back to a built-in default set when the file is
//! absent, and renders the whole base as grounding text for prompting.

pub mod default;

use std::path::Path;

use faqbot_core::FaqbotError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::default::DEFAULT_FAQ;

/// Errors from knowledge base loading.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("failed to read knowledge source: {0}")]
    Load(String),
    #[error("invalid knowledge schema: {0}")]
    Schema(String),
}

impl From<KbError> for FaqbotError {
    fn from(err: KbError) -> Self {
        match err {
            KbError::Load(msg) => FaqbotError::Knowledge(msg),
            KbError::Schema(msg) => FaqbotError::Schema(msg),
        }
    }
}

/// One question/answer pair. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Ordered, read-only collection of FAQ entries.
///
/// Insertion order is preserved; it determines prompt rendering order.
/// Duplicate questions are legal and simply both appear in the rendered
/// text. Shared read-only across sessions after load.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<FaqEntry>,
}

impl KnowledgeBase {
    /// Build a knowledge base from entries, rejecting empty questions or
    /// answers.
    pub fn from_entries(entries: Vec<FaqEntry>) -> Result<Self, KbError> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.question.trim().is_empty() || entry.answer.trim().is_empty() {
                return Err(KbError::Schema(format!(
                    "entry {} has an empty question or answer",
                    i + 1
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in default set.
    pub fn default_set() -> Self {
        let entries = DEFAULT_FAQ
            .iter()
            .map(|(question, answer)| FaqEntry {
                question: (*question).to_string(),
                answer: (*answer).to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Load a knowledge base from a CSV file.
    ///
    /// The file must have `question` and `answer` columns; extra columns are
    /// ignored. An absent or unreadable file is a [`KbError::Load`]; missing
    /// columns or empty values are a [`KbError::Schema`].
    pub fn load(path: &Path) -> Result<Self, KbError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| KbError::Load(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| KbError::Load(e.to_string()))?
            .clone();
        let question_idx = headers
            .iter()
            .position(|h| h == "question")
            .ok_or_else(|| KbError::Schema("missing 'question' column".to_string()))?;
        let answer_idx = headers
            .iter()
            .position(|h| h == "answer")
            .ok_or_else(|| KbError::Schema("missing 'answer' column".to_string()))?;

        let mut entries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| KbError::Load(e.to_string()))?;
            let question = record.get(question_idx).unwrap_or("").trim();
            let answer = record.get(answer_idx).unwrap_or("").trim();
            if question.is_empty() || answer.is_empty() {
                return Err(KbError::Schema(format!(
                    "row {} has an empty question or answer",
                    row + 1
                )));
            }
            entries.push(FaqEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            });
        }

        info!(path = %path.display(), entries = entries.len(), "Knowledge base loaded");
        Ok(Self { entries })
    }

    /// Load from `path`, or fall back to the built-in default set when the
    /// file does not exist. Load and schema errors on an existing file still
    /// propagate.
    pub fn load_or_default(path: &Path) -> Result<Self, KbError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "Knowledge CSV absent, using built-in defaults");
            Ok(Self::default_set())
        }
    }

    /// Persist the built-in default set as CSV, creating parent directories.
    pub fn write_default(path: &Path) -> Result<(), KbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| KbError::Load(e.to_string()))?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(|e| KbError::Load(e.to_string()))?;
        for entry in Self::default_set().entries() {
            writer
                .serialize(entry)
                .map_err(|e| KbError::Load(e.to_string()))?;
        }
        writer.flush().map_err(|e| KbError::Load(e.to_string()))?;
        info!(path = %path.display(), "Default knowledge base written");
        Ok(())
    }

    /// Render the whole base as grounding text, one `Q:`/`A:` block per
    /// entry in insertion order. Stable across calls.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("Q: {}\nA: {}", e.question, e.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
