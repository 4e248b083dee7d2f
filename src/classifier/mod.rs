//! User-input classification
//!
//! Decides whether one decoded [`LogRecord`] is genuine end-user input and, if so,
//! recovers its display text. The decision is a pure function of the record and the
//! [`SchemaVariant`]: record gates, then content extraction by shape, then noise
//! rules, then truncation. See [`rules`] for the per-variant rule tables.

pub mod rules;

use tracing::trace;

use crate::models::{ContentBlock, LogRecord, MessageContent, SchemaVariant};

pub use rules::{RuleSet, rules_for};

/// Appended to text cut at the length limit
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    UserText(String),
    NotUserInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    max_text_length: usize,
}

impl Classifier {
    pub fn new(max_text_length: usize) -> Self {
        Self { max_text_length }
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    pub fn classify(&self, record: &LogRecord, variant: SchemaVariant) -> Classification {
        let rules = rules_for(variant);

        if let Some(rule) = rules.rejecting_gate(record) {
            trace!(rule, uuid = record.uuid.as_deref(), "record gated");
            return Classification::NotUserInput;
        }

        let Some(text) = candidate_text(record) else {
            return Classification::NotUserInput;
        };

        if let Some(rule) = rules.rejecting_noise(&text) {
            trace!(rule, uuid = record.uuid.as_deref(), "text rejected as noise");
            return Classification::NotUserInput;
        }

        Classification::UserText(truncate(&text, self.max_text_length))
    }
}

/// Extract the candidate user text from `message.content`, by shape
///
/// Plain strings are taken as-is. Block arrays qualify only when the first block is
/// a text block and no block is a tool result; their text blocks are joined with a
/// single space, newlines inside each block flattened to spaces.
pub fn candidate_text(record: &LogRecord) -> Option<String> {
    let text = match record.content()? {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Blocks(blocks) => join_text_blocks(blocks)?,
        MessageContent::Other(_) => return None,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }
    Some(text)
}

fn join_text_blocks(blocks: &[ContentBlock]) -> Option<String> {
    let first = blocks.first()?;
    if blocks.iter().any(ContentBlock::is_tool_result) || !first.is_text() {
        return None;
    }

    let parts: Vec<String> = blocks
        .iter()
        .filter(|block| block.is_text())
        .filter_map(|block| block.text.as_deref())
        .map(|text| text.replace(['\r', '\n'], " "))
        .collect();
    Some(parts.join(" "))
}

/// Cut `text` to `max_chars` characters, marking the cut with [`ELLIPSIS`]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}
