//! Grounded answer generation.
//!
//! Builds a grounding prompt restricting the model to the knowledge base,
//! makes a single generation call, and recovers any failure into a
//! displayable warning string, so the caller always gets text back.

use std::sync::Arc;

use faqbot_kb::KnowledgeBase;
use faqbot_llm::TextGenerator;

/// Exact refusal the model is instructed to return when no matching
/// knowledge exists.
pub const REFUSAL: &str = "Sorry, I don't have information about that.";

/// Marker prefixing a recovered generation failure.
pub const WARNING_PREFIX: &str = "⚠️ Error:";

const SYSTEM_PROMPT: &str = "You are an FAQ chatbot.";

/// Turns a user query plus the knowledge base into an answer string.
pub struct AnswerEngine {
    generator: Arc<dyn TextGenerator>,
}

impl AnswerEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer `query` using only the facts in `kb`.
    ///
    /// Does not validate that `query` is non-empty; that gate lives in the
    /// session controller. One generation call, no retry. A failing call is
    /// recovered into a warning string rather than propagated.
    pub async fn answer(&self, query: &str, kb: &KnowledgeBase) -> String {
        let prompt = build_prompt(query, kb);
        match self.generator.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed; answering with warning");
                format!("{WARNING_PREFIX} {e}")
            }
        }
    }
}

/// Grounding instruction embedding the rendered knowledge base and the
/// literal user query.
fn build_prompt(query: &str, kb: &KnowledgeBase) -> String {
    format!(
        "You are a polite and helpful FAQ chatbot.\n\
         Use only the FAQs to answer.\n\
         \n\
         FAQs:\n\
         {faqs}\n\
         \n\
         User asked: \"{query}\"\n\
         \n\
         If the answer is in the FAQs, respond succinctly.\n\
         If not found, reply exactly: \"{REFUSAL}\"",
        faqs = kb.render(),
    )
}

// =============================================================================
// Tests
// =============================================================================
