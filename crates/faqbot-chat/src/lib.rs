//! Conversational core of faqbot.
//!
//! Grounded answer generation over a fixed knowledge base, an append-only
//! conversation log, and the session controller coordinating one
//! request/response cycle at a time.

pub mod engine;
pub mod log;
pub mod session;

pub use engine::{AnswerEngine, REFUSAL, WARNING_PREFIX};
pub use log::{ConversationEntry, ConversationLog, Sender};
pub use session::{Session, SessionController, SubmitOutcome, EMPTY_QUERY_NOTICE};
