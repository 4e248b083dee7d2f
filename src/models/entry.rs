use clap::ValueEnum;
use serde::Serialize;

use crate::models::LogRecord;

/// Output shaping for extracted entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Text in a fenced block
    #[default]
    Basic,
    /// Fenced text plus timestamp, directory and record id
    Detailed,
    /// One structured object per entry
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub format: OutputFormat,
    /// Maximum number of entries; 0 means unbounded
    pub limit: usize,
    /// Emit the newest entries first
    pub reverse: bool,
    pub include_multiline: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { format: OutputFormat::Basic, limit: 10, reverse: false, include_multiline: false }
    }
}

/// One surviving user input, text already truncated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedEntry {
    pub timestamp: Option<String>,
    pub content: String,
    pub cwd: Option<String>,
    pub uuid: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "isMeta")]
    pub is_meta: Option<bool>,
}

impl ExtractedEntry {
    pub fn from_record(record: &LogRecord, content: String) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            content,
            cwd: record.cwd.clone(),
            uuid: record.uuid.clone(),
            session_id: record.session_id.clone(),
            is_meta: record.is_meta,
        }
    }
}
