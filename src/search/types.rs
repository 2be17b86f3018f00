use serde::Deserialize;

/// One raw document returned by the search index. Field order is preserved.
pub type SearchRecord = serde_json::Map<String, serde_json::Value>;

/// A formatted, human-readable excerpt built from one record.
pub type Snippet = String;

/// Body of an index search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub value: Vec<SearchRecord>,
}
