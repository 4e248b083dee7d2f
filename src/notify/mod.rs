//! Notification text for an enriched hook payload
//!
//! Produces the message a messaging sink would deliver. Delivery itself is left to
//! the caller; this module only guarantees the text fits the configured budget.

use serde_json::{Map, Value};

use crate::classifier::{ELLIPSIS, truncate};
use crate::enrich::{PROJECT_NAME_FIELD, USER_INPUTS_FIELD};
use crate::locator::present;
use crate::utils::Settings;

const INPUTS_HEADING: &str = "Recent inputs:";
const SHORT_SESSION_LEN: usize = 8;
const DEFAULT_EVENT: &str = "Notification";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub unknown_project: String,
    pub unknown_session: String,
    pub unknown_message: String,
    /// Upper bound on the rendered text, in characters
    pub max_length: usize,
}

impl From<&Settings> for NotifyConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            unknown_project: settings.unknown_project.clone(),
            unknown_session: settings.unknown_session.clone(),
            unknown_message: settings.unknown_message.clone(),
            max_length: settings.max_message_length,
        }
    }
}

fn str_field<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    present(payload.get(key).and_then(Value::as_str))
}

/// Render the user inputs field, whichever shape it was merged in
fn inputs_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("content").and_then(Value::as_str))
            .map(|content| format!("- {}", content))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

pub fn render_notification(payload: &Map<String, Value>, config: &NotifyConfig) -> String {
    let event = str_field(payload, "hook_event_name").unwrap_or(DEFAULT_EVENT);
    let project = str_field(payload, PROJECT_NAME_FIELD).unwrap_or(config.unknown_project.as_str());
    let session: String = match str_field(payload, "session_id") {
        Some(id) => id.chars().take(SHORT_SESSION_LEN).collect(),
        None => config.unknown_session.clone(),
    };
    let message = str_field(payload, "message").unwrap_or(config.unknown_message.as_str());

    let header = format!("[{event}] {project}\nSession: {session}\nMessage: {message}");
    let inputs = inputs_text(payload.get(USER_INPUTS_FIELD));
    fit(header, &inputs, config.max_length)
}

/// Fit header and inputs into `max` characters, cutting the inputs first
fn fit(header: String, inputs: &str, max: usize) -> String {
    if inputs.is_empty() {
        return cut(header, max);
    }

    let prefix = format!("{header}\n\n{INPUTS_HEADING}\n");
    let prefix_len = prefix.chars().count();
    let inputs_len = inputs.chars().count();

    if prefix_len + inputs_len <= max {
        return prefix + inputs;
    }
    if prefix_len + ELLIPSIS.len() < max {
        let room = max - prefix_len - ELLIPSIS.len();
        return prefix + &truncate(inputs, room);
    }
    cut(header, max)
}

fn cut(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    truncate(&text, max.saturating_sub(ELLIPSIS.len()))
}
