//! Session state and the one-cycle-at-a-time controller.
//!
//! A [`Session`] owns its transcript and pending query exclusively; the
//! knowledge base is shared read-only. The controller runs the single core
//! transition per submission (log the query, generate, log the answer,
//! hand off to the output surface) as one `&mut self` async call, so
//! overlapping cycles within a session cannot be started.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use uuid::Uuid;

use faqbot_kb::KnowledgeBase;
use faqbot_speech::SpeechSynthesizer;

use crate::engine::AnswerEngine;
use crate::log::{ConversationLog, Sender};

/// Notice surfaced when a submission is empty after trimming.
pub const EMPTY_QUERY_NOTICE: &str = "Please enter or speak a question first.";

/// One user's conversational interaction window.
///
/// Created per session and discarded on session end; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Local>,
    pending_query: String,
    log: ConversationLog,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            pending_query: String::new(),
            log: ConversationLog::new(),
        }
    }

    /// The staged, not-yet-answered input.
    pub fn pending_query(&self) -> &str {
        &self.pending_query
    }

    /// The session transcript.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A full cycle ran; `audio` is present when an output synthesizer is
    /// configured and rendering succeeded.
    Answered {
        answer: String,
        audio: Option<PathBuf>,
    },
    /// The input was empty after trimming; nothing was logged or generated.
    EmptyQuery,
}

/// Coordinates request/response cycles for one session.
///
/// Agnostic to which input path (typed text or transcribed speech) produced
/// the query string.
pub struct SessionController {
    engine: AnswerEngine,
    kb: Arc<KnowledgeBase>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    session: Session,
}

impl SessionController {
    pub fn new(engine: AnswerEngine, kb: Arc<KnowledgeBase>) -> Self {
        Self {
            engine,
            kb,
            synthesizer: None,
            session: Session::new(),
        }
    }

    /// Attach an output synthesizer; answers are then also rendered to audio.
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stage typed input without submitting it.
    pub fn stage_query(&mut self, raw: &str) {
        self.session.pending_query = raw.to_string();
    }

    /// Submit whatever is staged, consuming the buffer.
    pub async fn submit_pending(&mut self) -> SubmitOutcome {
        let pending = std::mem::take(&mut self.session.pending_query);
        self.submit_query(&pending).await
    }

    /// Run one answer cycle.
    ///
    /// Empty or whitespace-only input short-circuits: no log entries, no
    /// generation call. Otherwise exactly two entries are appended: the
    /// user's query, then the bot's answer (which may be the recovered
    /// warning string).
    pub async fn submit_query(&mut self, raw: &str) -> SubmitOutcome {
        let query = raw.trim();
        if query.is_empty() {
            tracing::debug!(session = %self.session.id, "Empty submission ignored");
            return SubmitOutcome::EmptyQuery;
        }

        self.session.log.append(Sender::User, query);
        let answer = self.engine.answer(query, &self.kb).await;
        self.session.log.append(Sender::Bot, answer.clone());
        self.session.pending_query.clear();

        let audio = match &self.synthesizer {
            Some(synthesizer) => match synthesizer.synthesize(&answer).await {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!(error = %e, "Speech synthesis failed; answer is text-only");
                    None
                }
            },
            None => None,
        };

        tracing::info!(
            session = %self.session.id,
            query_len = query.len(),
            answer_len = answer.len(),
            "Answer cycle complete"
        );

        SubmitOutcome::Answered { answer, audio }
    }
}

// =============================================================================
// Tests
// =============================================================================
