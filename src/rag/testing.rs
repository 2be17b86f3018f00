//! Deterministic backends for unit tests.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{CompletionBackend, Message};
use crate::search::types::SearchRecord;
use crate::search::SearchBackend;

type SearchFn = Box<dyn Fn(&str, usize) -> Result<Vec<SearchRecord>> + Send + Sync>;

pub fn record(value: Value) -> SearchRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("record must be a JSON object, got {other}"),
    }
}

/// Search backend driven by a closure; records every `(query, top)` call.
pub struct FakeSearch {
    respond: SearchFn,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeSearch {
    pub fn new(
        respond: impl Fn(&str, usize) -> Result<Vec<SearchRecord>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(|_, _| Ok(vec![]))
    }

    pub fn failing() -> Self {
        Self::new(|_, _| Err(anyhow::anyhow!("search service unavailable")))
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for FakeSearch {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchRecord>> {
        self.calls.lock().unwrap().push((query.to_string(), top));
        (self.respond)(query, top)
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: f32,
}

/// Completion backend with a canned reply (or error); records every request.
pub struct FakeCompletion {
    reply: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("quota exceeded".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for FakeCompletion {
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
    ) -> Result<String> {
        self.requests.lock().unwrap().push(CompletionRequest {
            messages: messages.to_vec(),
            model: model.to_string(),
            temperature,
        });
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}
