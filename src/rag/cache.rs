use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::search::snippet::format_records;
use crate::search::types::Snippet;
use crate::search::SearchBackend;

use super::{BOOTSTRAP_TOP, SUBJECT_KEYWORD};

#[derive(Default)]
struct CacheState {
    snippets: Vec<Snippet>,
    initialized: bool,
}

/// General profile snippets for the bootstrap query, populated at most once.
///
/// The lock is held across the bootstrap search so concurrent turns trigger a
/// single backend call. A failed bootstrap leaves the cache uninitialized and
/// the next caller tries again.
pub struct DefaultCache {
    state: Mutex<CacheState>,
}

impl DefaultCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Populate on first use. Returns the number of cached snippets.
    pub async fn ensure_initialized(&self, search: &dyn SearchBackend) -> usize {
        let mut state = self.state.lock().await;
        if state.initialized {
            return state.snippets.len();
        }

        match search.search(SUBJECT_KEYWORD, BOOTSTRAP_TOP).await {
            Ok(records) => {
                state.snippets = format_records(&records);
                state.initialized = true;
                info!(documents = state.snippets.len(), "default knowledge cache loaded");
            }
            Err(e) => {
                warn!(error = %e, "default knowledge cache load failed, will retry on next use");
            }
        }

        state.snippets.len()
    }

    pub async fn snippets(&self) -> Vec<Snippet> {
        self.state.lock().await.snippets.clone()
    }

    /// `Some(count)` once populated.
    pub async fn status(&self) -> Option<usize> {
        let state = self.state.lock().await;
        state.initialized.then_some(state.snippets.len())
    }
}

impl Default for DefaultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::rag::testing::{record, FakeSearch};
    use serde_json::json;

    fn profile_search() -> FakeSearch {
        FakeSearch::new(|_, _| {
            Ok(vec![
                record(json!({ "summary": "Graduate software developer" })),
                record(json!({ "@search.score": 0.4 })),
                record(json!({ "projects": "Portfolio chatbot" })),
            ])
        })
    }

    #[tokio::test]
    async fn initializes_once() {
        let search = profile_search();
        let cache = DefaultCache::new();

        for _ in 0..4 {
            assert_eq!(cache.ensure_initialized(&search).await, 2);
            assert_eq!(
                cache.snippets().await,
                vec!["summary: Graduate software developer", "projects: Portfolio chatbot"]
            );
        }
        assert_eq!(search.calls(), vec![(SUBJECT_KEYWORD.to_string(), BOOTSTRAP_TOP)]);
    }

    #[tokio::test]
    async fn empty_bootstrap_is_still_initialized() {
        let search = FakeSearch::empty();
        let cache = DefaultCache::new();

        assert_eq!(cache.ensure_initialized(&search).await, 0);
        assert_eq!(cache.status().await, Some(0));
        cache.ensure_initialized(&search).await;
        assert_eq!(search.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_bootstrap_retries_next_time() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let search = FakeSearch::new(move |_, _| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(anyhow::anyhow!("timeout"))
            } else {
                Ok(vec![record(json!({ "summary": "Engineer" }))])
            }
        });
        let cache = DefaultCache::new();

        assert_eq!(cache.ensure_initialized(&search).await, 0);
        assert_eq!(cache.status().await, None);

        assert_eq!(cache.ensure_initialized(&search).await, 1);
        assert_eq!(cache.status().await, Some(1));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_bootstrap() {
        let search = Arc::new(profile_search());
        let cache = Arc::new(DefaultCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let search = search.clone();
                let cache = cache.clone();
                tokio::spawn(async move { cache.ensure_initialized(search.as_ref()).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 2);
        }
        assert_eq!(search.calls().len(), 1);
    }
}
