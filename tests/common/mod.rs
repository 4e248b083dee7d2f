//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const SESSION_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

/// Builder for a canonical projects-log root (`~/.claude/projects`)
pub struct ProjectsDirBuilder {
    temp_dir: TempDir,
}

impl ProjectsDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a log file at `relative` (nested directories are created)
    pub fn with_log(self, relative: &str, log: &LogBuilder) -> Self {
        log.write_to(&self.temp_dir.path().join(relative));
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the lines of one JSON-lines session log
#[derive(Default)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Add a raw line verbatim (malformed JSON, summaries, ...)
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to(&self, path: &Path) -> PathBuf {
        fs::create_dir_all(path.parent().expect("log path has a parent"))
            .expect("Failed to create log dir");
        fs::write(path, self.content()).expect("Failed to write log");
        path.to_path_buf()
    }
}

/// Builder for a single log record
pub struct RecordBuilder {
    record_type: String,
    role: String,
    content: Value,
    session_id: String,
    uuid: String,
    cwd: Option<String>,
    timestamp: String,
    is_meta: Option<bool>,
}

impl RecordBuilder {
    /// A user record with plain-string content
    pub fn user(text: &str) -> Self {
        Self {
            record_type: "user".to_string(),
            role: "user".to_string(),
            content: Value::String(text.to_string()),
            session_id: SESSION_ID.to_string(),
            uuid: format!("uuid-{}", text.len()),
            cwd: Some("/Users/test/my-project".to_string()),
            timestamp: "2025-06-01T12:00:00.000Z".to_string(),
            is_meta: None,
        }
    }

    /// A user record carrying text content blocks
    pub fn user_blocks(texts: &[&str]) -> Self {
        let blocks: Vec<Value> = texts.iter().map(|t| json!({"type": "text", "text": t})).collect();
        Self { content: Value::Array(blocks), ..Self::user("") }
    }

    /// A user record carrying a tool result
    pub fn tool_result(output: &str) -> Self {
        Self {
            content: json!([{"type": "tool_result", "tool_use_id": "toolu_01", "content": output}]),
            ..Self::user("")
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            record_type: "assistant".to_string(),
            role: "assistant".to_string(),
            content: json!([{"type": "text", "text": text}]),
            ..Self::user("")
        }
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.session_id = session_id.to_string();
        self
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    pub fn cwd(mut self, cwd: Option<&str>) -> Self {
        self.cwd = cwd.map(str::to_string);
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn meta(mut self) -> Self {
        self.is_meta = Some(true);
        self
    }

    pub fn to_json(&self) -> String {
        let mut record = json!({
            "type": self.record_type,
            "message": {"role": self.role, "content": self.content},
            "sessionId": self.session_id,
            "uuid": self.uuid,
            "timestamp": self.timestamp,
        });
        if let Some(cwd) = &self.cwd {
            record["cwd"] = Value::String(cwd.clone());
        }
        if let Some(is_meta) = self.is_meta {
            record["isMeta"] = Value::Bool(is_meta);
        }
        record.to_string()
    }
}

/// A log with `n` user inputs named `E1..En`
pub fn numbered_log(n: usize) -> LogBuilder {
    (1..=n).fold(LogBuilder::new(), |log, i| {
        log.record(RecordBuilder::user(&format!("E{}", i)).uuid(&format!("u{}", i)))
    })
}

/// A realistic log mixing user input with the noise a real session produces
pub fn realistic_log() -> LogBuilder {
    LogBuilder::new()
        .raw(r#"{"type":"summary","summary":"Refactor login","leafUuid":"x"}"#)
        .record(RecordBuilder::user("Caveat: The messages below were generated by the user while running local commands."))
        .record(RecordBuilder::user("<command-name>/model</command-name>"))
        .record(RecordBuilder::user("Fix the login redirect").uuid("u-login"))
        .record(RecordBuilder::assistant("Looking at the router now"))
        .record(RecordBuilder::tool_result("src/router.rs contents"))
        .raw("{this line is truncated")
        .record(RecordBuilder::user_blocks(&["Also add a test", "for the\nlogout path"]).uuid("u-test"))
        .record(RecordBuilder::user("[Request interrupted by user]"))
}
