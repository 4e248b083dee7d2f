//! Hook payload enrichment
//!
//! Merges a derived `project_name` and the session's recent `user_inputs` into the
//! incoming hook payload.
//!
//! # Error Handling Strategy
//!
//! Only a payload that is not a JSON object fails the operation. Every later step
//! degrades to a default instead: an unresolvable session yields the unknown-project
//! sentinel and empty user inputs, an unreadable log yields empty user inputs. The
//! result is therefore always a well-formed JSON object.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::classifier::Classifier;
use crate::locator::{LookupCache, SessionLocator, present};
use crate::models::{ExtractOptions, ExtractedEntry, OutputFormat, ResolvedSession};
use crate::parsers::RecordReader;
use crate::pipeline::{self, render_joined, render_json};
use crate::utils::project_name_from_cwd;

pub const PROJECT_NAME_FIELD: &str = "project_name";
pub const USER_INPUTS_FIELD: &str = "user_inputs";

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("invalid hook payload: {0}")]
    InvalidInput(String),
}

/// The identifying fields of a hook payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadRefs {
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
}

impl PayloadRefs {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let field = |key: &str| {
            present(payload.get(key).and_then(Value::as_str)).map(str::to_string)
        };
        Self { session_id: field("session_id"), transcript_path: field("transcript_path") }
    }
}

/// Parse raw stdin into a payload object
pub fn parse_payload(raw: &str) -> Result<Map<String, Value>, EnrichError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(EnrichError::InvalidInput(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(EnrichError::InvalidInput(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub struct Enricher<C> {
    locator: SessionLocator<C>,
    classifier: Classifier,
    unknown_project: String,
}

impl<C: LookupCache> Enricher<C> {
    pub fn new(locator: SessionLocator<C>, classifier: Classifier, unknown_project: impl Into<String>) -> Self {
        Self { locator, classifier, unknown_project: unknown_project.into() }
    }

    pub fn locator(&self) -> &SessionLocator<C> {
        &self.locator
    }

    /// Enrich a raw payload string
    pub fn enrich(&mut self, raw: &str, options: &ExtractOptions) -> Result<Value, EnrichError> {
        let payload = parse_payload(raw)?;
        Ok(Value::Object(self.enrich_payload(payload, options)))
    }

    pub fn enrich_payload(
        &mut self,
        mut payload: Map<String, Value>,
        options: &ExtractOptions,
    ) -> Map<String, Value> {
        let refs = PayloadRefs::from_payload(&payload);
        let resolved = self.resolve(&refs);

        let project_name = resolved
            .as_ref()
            .and_then(|session| project_name_from_log(&session.path))
            .unwrap_or_else(|| self.unknown_project.clone());
        payload.insert(PROJECT_NAME_FIELD.to_string(), Value::String(project_name));

        let entries = self.user_inputs(resolved.as_ref(), &refs, options);
        let user_inputs = match options.format {
            OutputFormat::Json => render_json(&entries),
            format => Value::String(render_joined(&entries, format, options.include_multiline)),
        };
        payload.insert(USER_INPUTS_FIELD.to_string(), user_inputs);

        payload
    }

    pub fn resolve(&mut self, refs: &PayloadRefs) -> Option<ResolvedSession> {
        self.locator.resolve(refs.session_id.as_deref(), refs.transcript_path.as_deref())
    }

    /// Extracted entries for the resolved log, empty when nothing resolved or the
    /// log cannot be read
    pub fn user_inputs(
        &self,
        resolved: Option<&ResolvedSession>,
        refs: &PayloadRefs,
        options: &ExtractOptions,
    ) -> Vec<ExtractedEntry> {
        let Some(session) = resolved else {
            debug!(session_id = refs.session_id.as_deref(), "no user inputs available");
            return Vec::new();
        };

        match pipeline::extract(&session.path, session.variant, &self.classifier, options) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %session.path.display(), error = %format!("{:#}", e), "extraction failed");
                Vec::new()
            }
        }
    }
}

/// Project name from the first record in the log carrying a working directory
pub fn project_name_from_log(path: &Path) -> Option<String> {
    let reader = match RecordReader::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            debug!(error = %format!("{:#}", e), "cannot read log for project name");
            return None;
        }
    };

    let mut cwds = reader.filter_map(|record| record.cwd);
    let cwd = cwds.find(|cwd| !cwd.is_empty())?;
    project_name_from_cwd(&cwd)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::locator::MemoryCache;

    fn enricher(root: &Path) -> Enricher<MemoryCache> {
        Enricher::new(SessionLocator::new(root, MemoryCache::new()), Classifier::new(200), "unknown")
    }

    fn write_log(path: &Path, lines: &[&str]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, lines.join("\n")).unwrap();
    }

    const SUMMARY: &str = r#"{"type":"summary","summary":"x"}"#;
    const FIRST: &str = r#"{"type":"user","cwd":"/Users/alice/shop","sessionId":"s1","uuid":"u1","message":{"role":"user","content":"add a cart"}}"#;
    const SECOND: &str = r#"{"type":"user","cwd":"/Users/alice/shop","sessionId":"s1","uuid":"u2","message":{"role":"user","content":[{"type":"text","text":"and checkout"}]}}"#;

    #[test]
    fn test_parse_payload_rejects_non_objects() {
        assert!(matches!(parse_payload("not json"), Err(EnrichError::InvalidInput(_))));
        let err = parse_payload("[1]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(parse_payload(r#"{"a":1}"#).is_ok());
    }

    #[test]
    fn test_payload_refs_treat_null_as_absent() {
        let payload = parse_payload(r#"{"session_id":"null","transcript_path":"","x":1}"#).unwrap();
        assert_eq!(PayloadRefs::from_payload(&payload), PayloadRefs::default());

        let payload = parse_payload(r#"{"session_id":null,"transcript_path":7}"#).unwrap();
        assert_eq!(PayloadRefs::from_payload(&payload), PayloadRefs::default());
    }

    #[test]
    fn test_enrich_by_session_id() {
        let root = TempDir::new().unwrap();
        write_log(&root.path().join("-Users-alice-shop/s1.jsonl"), &[SUMMARY, FIRST, SECOND]);

        let options = ExtractOptions { format: OutputFormat::Json, ..Default::default() };
        let enriched = enricher(root.path())
            .enrich(r#"{"session_id":"s1","hook_event_name":"Stop"}"#, &options)
            .unwrap();

        assert_eq!(enriched["hook_event_name"], "Stop");
        assert_eq!(enriched["project_name"], "shop");
        let inputs = enriched["user_inputs"].as_array().unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0]["content"], "add a cart");
        assert_eq!(inputs[1]["uuid"], "u2");
    }

    #[test]
    fn test_enrich_basic_format_is_string() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let transcript = elsewhere.path().join("t.jsonl");
        write_log(&transcript, &[FIRST]);

        let raw = json!({ "transcript_path": transcript }).to_string();
        let enriched = enricher(root.path()).enrich(&raw, &ExtractOptions::default()).unwrap();
        assert_eq!(enriched["project_name"], "shop");
        assert_eq!(enriched["user_inputs"], "```\nadd a cart\n```");
    }

    #[test]
    fn test_enrich_degrades_when_session_missing() {
        let root = TempDir::new().unwrap();
        let mut enricher = enricher(root.path());

        for (format, expected) in [
            (OutputFormat::Json, json!([])),
            (OutputFormat::Basic, json!("")),
            (OutputFormat::Detailed, json!("")),
        ] {
            let options = ExtractOptions { format, ..Default::default() };
            let enriched = enricher.enrich(r#"{"session_id":"does-not-exist"}"#, &options).unwrap();
            assert_eq!(enriched["project_name"], "unknown");
            assert_eq!(enriched["user_inputs"], expected);
        }
    }

    #[test]
    fn test_enrich_custom_unknown_sentinel() {
        let root = TempDir::new().unwrap();
        let mut enricher =
            Enricher::new(SessionLocator::new(root.path(), MemoryCache::new()), Classifier::new(200), "n/a");
        let enriched = enricher.enrich("{}", &ExtractOptions::default()).unwrap();
        assert_eq!(enriched["project_name"], "n/a");
    }

    #[test]
    fn test_enrich_overwrites_existing_fields() {
        let root = TempDir::new().unwrap();
        let enriched = enricher(root.path())
            .enrich(r#"{"project_name":"stale","user_inputs":42}"#, &ExtractOptions::default())
            .unwrap();
        assert_eq!(enriched["project_name"], "unknown");
        assert_eq!(enriched["user_inputs"], "");
    }

    #[test]
    fn test_user_inputs_empty_when_log_unreadable() {
        let root = TempDir::new().unwrap();
        let enricher = enricher(root.path());
        let gone = ResolvedSession {
            path: root.path().join("p/removed.jsonl"),
            variant: crate::models::SchemaVariant::ProjectsFormat,
        };

        let refs = PayloadRefs { session_id: Some("removed".into()), transcript_path: None };
        assert!(enricher.user_inputs(Some(&gone), &refs, &ExtractOptions::default()).is_empty());
        assert!(enricher.user_inputs(None, &refs, &ExtractOptions::default()).is_empty());
    }

    #[test]
    fn test_project_name_without_cwd_is_unknown() {
        let root = TempDir::new().unwrap();
        write_log(
            &root.path().join("p/s2.jsonl"),
            &[r#"{"type":"user","sessionId":"s2","message":{"role":"user","content":"hi"}}"#],
        );
        let enriched = enricher(root.path())
            .enrich(r#"{"session_id":"s2"}"#, &ExtractOptions::default())
            .unwrap();
        assert_eq!(enriched["project_name"], "unknown");
        assert_eq!(enriched["user_inputs"], "```\nhi\n```");
    }

    #[test]
    fn test_project_name_from_log_skips_records_without_cwd() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("l.jsonl");
        write_log(&log, &[SUMMARY, r#"{"cwd":""}"#, "garbage", FIRST]);
        assert_eq!(project_name_from_log(&log), Some("shop".into()));
        assert_eq!(project_name_from_log(&dir.path().join("missing.jsonl")), None);
    }
}
