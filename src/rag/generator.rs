use tracing::{debug, error};

use crate::llm::{CompletionBackend, Message};
use crate::search::types::Snippet;

use super::prompts::{build_system_prompt, GENERATION_FALLBACK};
use super::{StrategyLabel, HISTORY_WINDOW, TEMPERATURE};

/// Turns retrieved snippets and prior turns into a reply.
pub struct ResponseGenerator<'a> {
    llm: &'a dyn CompletionBackend,
    model: &'a str,
}

impl<'a> ResponseGenerator<'a> {
    pub fn new(llm: &'a dyn CompletionBackend, model: &'a str) -> Self {
        Self { llm, model }
    }

    /// Always returns presentable text; backend failures become [`GENERATION_FALLBACK`].
    pub async fn generate(
        &self,
        question: &str,
        snippets: &[Snippet],
        strategy: StrategyLabel,
        history: &[Message],
    ) -> String {
        let system_prompt = build_system_prompt(strategy, snippets, question);
        let messages = build_messages(system_prompt, history, question);
        debug!(
            %strategy,
            messages = messages.len(),
            model = self.model,
            "requesting completion"
        );

        match self.llm.complete(&messages, self.model, TEMPERATURE).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                error!(%strategy, "completion returned empty content");
                GENERATION_FALLBACK.to_string()
            }
            Err(e) => {
                error!(%strategy, error = %e, "completion failed");
                GENERATION_FALLBACK.to_string()
            }
        }
    }
}

/// System turn, the most recent [`HISTORY_WINDOW`] turns in order, then the question.
pub fn build_messages(system_prompt: String, history: &[Message], question: &str) -> Vec<Message> {
    let window = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

    let mut messages = Vec::with_capacity(window.len() + 2);
    messages.push(Message::system(system_prompt));
    messages.extend_from_slice(window);
    messages.push(Message::user(question));
    messages
}
