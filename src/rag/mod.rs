pub mod cache;
pub mod generator;
pub mod prompts;
pub mod strategy;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use tracing::info;

use crate::llm::{CompletionBackend, Message};
use crate::search::types::Snippet;
use crate::search::SearchBackend;

use cache::DefaultCache;
use generator::ResponseGenerator;
pub use strategy::StrategyLabel;
use strategy::RetrievalStrategy;

/// Identity keyword the index is built around; also the bootstrap query.
pub const SUBJECT_KEYWORD: &str = "Arehone";
/// Results requested for direct and enhanced searches.
pub const QUERY_TOP: usize = 8;
/// Results requested when populating the default cache.
pub const BOOTSTRAP_TOP: usize = 15;
/// Most recent conversation turns forwarded to the model.
pub const HISTORY_WINDOW: usize = 10;
pub const TEMPERATURE: f32 = 1.0;

/// Per-session assistant: owns the default cache and the two backends.
pub struct Assistant {
    search: Arc<dyn SearchBackend>,
    llm: Arc<dyn CompletionBackend>,
    model: String,
    cache: DefaultCache,
}

impl Assistant {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        llm: Arc<dyn CompletionBackend>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            search,
            llm,
            model: model.into(),
            cache: DefaultCache::new(),
        }
    }

    /// Run the three-tier fallback for a question.
    pub async fn retrieve(&self, question: &str) -> (Vec<Snippet>, StrategyLabel) {
        let (snippets, strategy) = RetrievalStrategy::new(self.search.as_ref(), &self.cache)
            .resolve(question)
            .await;
        info!(%strategy, snippets = snippets.len(), "retrieval resolved");
        (snippets, strategy)
    }

    /// Produce a reply; never fails.
    pub async fn respond(
        &self,
        question: &str,
        snippets: &[Snippet],
        strategy: StrategyLabel,
        history: &[Message],
    ) -> String {
        ResponseGenerator::new(self.llm.as_ref(), &self.model)
            .generate(question, snippets, strategy, history)
            .await
    }

    /// Populate the default cache ahead of need. Returns the cached document count.
    pub async fn preload(&self) -> usize {
        self.cache.ensure_initialized(self.search.as_ref()).await
    }

    /// `Some(count)` once the default cache has been populated.
    pub async fn knowledge_status(&self) -> Option<usize> {
        self.cache.status().await
    }
}
