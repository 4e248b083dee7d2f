//! Per-mode rendering of extracted entries

use serde_json::Value;

use crate::models::{ExtractedEntry, OutputFormat};

const FENCE: &str = "```";
const MISSING: &str = "-";

fn fenced(text: &str) -> String {
    format!("{FENCE}\n{text}\n{FENCE}")
}

fn detailed(entry: &ExtractedEntry) -> String {
    format!(
        "{}\nTime: {}\nDirectory: {}\nID: {}",
        fenced(&entry.content),
        entry.timestamp.as_deref().unwrap_or(MISSING),
        entry.cwd.as_deref().unwrap_or(MISSING),
        entry.uuid.as_deref().unwrap_or(MISSING),
    )
}

/// Structured form: the record's fields with `content` replaced by the extracted text
pub fn entry_json(entry: &ExtractedEntry) -> Value {
    serde_json::to_value(entry).unwrap_or(Value::Null)
}

/// Render one entry as text
///
/// JSON mode yields the compact serialized object, one per line. Text is fenced
/// whether or not `_include_multiline` is set, so single-line and multiline inputs
/// render the same way downstream.
pub fn render_entry(entry: &ExtractedEntry, format: OutputFormat, _include_multiline: bool) -> String {
    match format {
        OutputFormat::Basic => fenced(&entry.content),
        OutputFormat::Detailed => detailed(entry),
        OutputFormat::Json => entry_json(entry).to_string(),
    }
}

/// Render all entries as one newline-joined string (empty when there are none)
pub fn render_joined(entries: &[ExtractedEntry], format: OutputFormat, include_multiline: bool) -> String {
    entries
        .iter()
        .map(|entry| render_entry(entry, format, include_multiline))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render all entries as a JSON array
pub fn render_json(entries: &[ExtractedEntry]) -> Value {
    Value::Array(entries.iter().map(entry_json).collect())
}
