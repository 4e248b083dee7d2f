use serde::Deserialize;
use serde_json::Value;

use crate::parsers::deserializers::{
    deserialize_lenient_bool, deserialize_lenient_string, deserialize_present, deserialize_timestamp,
};

/// One decoded line of a session log
///
/// Every field is optional: log lines come in many shapes (summaries, snapshots,
/// system records) and only the fields the classifier looks at are modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "type", default, deserialize_with = "deserialize_lenient_string")]
    pub record_type: Option<String>,
    #[serde(default)]
    pub message: Option<RecordMessage>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub uuid: Option<String>,
    #[serde(rename = "sessionId", default, deserialize_with = "deserialize_lenient_string")]
    pub session_id: Option<String>,
    #[serde(rename = "isMeta", default, deserialize_with = "deserialize_lenient_bool")]
    pub is_meta: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordMessage {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: MessageContent,
}

/// `message.content` is either a bare string or an array of content blocks.
/// Anything else (numbers, objects, null, arrays of non-objects) lands in `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Other(Value::Null)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Present (with any value) on tool-result blocks
    #[serde(default, deserialize_with = "deserialize_present")]
    pub tool_use_id: Option<Value>,
}

impl ContentBlock {
    pub fn is_tool_result(&self) -> bool {
        self.tool_use_id.is_some()
    }

    pub fn is_text(&self) -> bool {
        self.block_type.as_deref() == Some("text")
    }
}

impl LogRecord {
    pub fn record_type(&self) -> &str {
        self.record_type.as_deref().unwrap_or("")
    }

    pub fn role(&self) -> &str {
        self.message.as_ref().and_then(|m| m.role.as_deref()).unwrap_or("")
    }

    pub fn content(&self) -> Option<&MessageContent> {
        self.message.as_ref().map(|m| &m.content)
    }

    pub fn is_meta(&self) -> bool {
        self.is_meta.unwrap_or(false)
    }

    /// The working directory, if the record carries a non-empty one
    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref().filter(|c| !c.is_empty())
    }
}
