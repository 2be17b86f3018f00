use serde_json::Value;

use super::types::{SearchRecord, Snippet};

/// Fields starting with this prefix are search-engine annotations (score, highlights).
const METADATA_PREFIX: char = '@';

/// Render a record as `name: value` lines, keeping only non-blank text fields.
/// Returns `None` when nothing qualifies.
pub fn format_record(record: &SearchRecord) -> Option<Snippet> {
    let lines: Vec<String> = record
        .iter()
        .filter(|(key, _)| !key.starts_with(METADATA_PREFIX))
        .filter_map(|(key, value)| match value {
            Value::String(text) if !text.trim().is_empty() => Some(format!("{}: {}", key, text)),
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Format every record, dropping the ones that contribute nothing.
pub fn format_records(records: &[SearchRecord]) -> Vec<Snippet> {
    records.iter().filter_map(format_record).collect()
}
