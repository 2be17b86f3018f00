use std::fmt;

use tracing::{debug, warn};

use crate::search::snippet::format_records;
use crate::search::types::Snippet;
use crate::search::SearchBackend;

use super::cache::DefaultCache;
use super::{QUERY_TOP, SUBJECT_KEYWORD};

/// Which tier of the fallback produced the snippets in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyLabel {
    Direct,
    Enhanced,
    Default,
}

impl StrategyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyLabel::Direct => "direct",
            StrategyLabel::Enhanced => "enhanced",
            StrategyLabel::Default => "default",
        }
    }

    /// Progress line shown to the user once retrieval settles.
    pub fn status_message(&self) -> &'static str {
        match self {
            StrategyLabel::Direct => "✅ Found specific information in knowledge base",
            StrategyLabel::Enhanced => "🔍 Using enhanced search strategy",
            StrategyLabel::Default => "📚 Using general knowledge about Arehone",
        }
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap a question so the search is anchored on the subject.
pub fn enhanced_query(question: &str) -> String {
    format!("what could be {} and {}", question, SUBJECT_KEYWORD)
}

/// Direct → enhanced → cached-default retrieval.
pub struct RetrievalStrategy<'a> {
    search: &'a dyn SearchBackend,
    cache: &'a DefaultCache,
}

impl<'a> RetrievalStrategy<'a> {
    pub fn new(search: &'a dyn SearchBackend, cache: &'a DefaultCache) -> Self {
        Self { search, cache }
    }

    pub async fn resolve(&self, question: &str) -> (Vec<Snippet>, StrategyLabel) {
        if !question.trim().is_empty() {
            let snippets = self.search_snippets(question).await;
            if !snippets.is_empty() {
                return (snippets, StrategyLabel::Direct);
            }
            debug!("direct search empty, trying enhanced query");
        }

        let snippets = self.search_snippets(&enhanced_query(question)).await;
        if !snippets.is_empty() {
            return (snippets, StrategyLabel::Enhanced);
        }
        debug!("enhanced search empty, falling back to default cache");

        self.cache.ensure_initialized(self.search).await;
        (self.cache.snippets().await, StrategyLabel::Default)
    }

    /// A failed search counts as no results.
    async fn search_snippets(&self, query: &str) -> Vec<Snippet> {
        match self.search.search(query, QUERY_TOP).await {
            Ok(records) => format_records(&records),
            Err(e) => {
                warn!(query, error = %e, "search failed");
                Vec::new()
            }
        }
    }
}
