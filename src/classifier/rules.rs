//! Rule tables for user-input classification
//!
//! Each [`SchemaVariant`] gets a fixed, ordered [`RuleSet`]: record gates run
//! before any text is extracted, noise rules run against the candidate text.
//! The first rule that rejects wins; its name shows up in debug traces.

use crate::models::{LogRecord, SchemaVariant};

/// Literal markers injected by slash commands, local shell output and reminders
pub const COMMAND_MARKERS: &[&str] = &[
    "<command-name>",
    "<command-message>",
    "<command-args>",
    "<local-command-stdout>",
    "<system-reminder>",
];

const LOG_LEVEL_PREFIXES: &[&str] = &["ERROR:", "WARNING:", "INFO:", "DEBUG:", "SYSTEM:"];

const TOOL_PHRASES: &[&str] = &["Tool execution", "Assistant response"];

pub struct RecordRule {
    pub name: &'static str,
    pub rejects: fn(&LogRecord) -> bool,
}

pub struct TextRule {
    pub name: &'static str,
    pub rejects: fn(&str) -> bool,
}

pub struct RuleSet {
    pub gates: &'static [RecordRule],
    pub noise: &'static [TextRule],
}

impl RuleSet {
    /// Name of the first gate rejecting `record`
    pub fn rejecting_gate(&self, record: &LogRecord) -> Option<&'static str> {
        self.gates.iter().find(|rule| (rule.rejects)(record)).map(|rule| rule.name)
    }

    /// Name of the first noise rule rejecting `text`
    pub fn rejecting_noise(&self, text: &str) -> Option<&'static str> {
        self.noise.iter().find(|rule| (rule.rejects)(text)).map(|rule| rule.name)
    }
}

pub fn rules_for(variant: SchemaVariant) -> &'static RuleSet {
    match variant {
        SchemaVariant::ProjectsFormat => &PROJECTS_RULES,
        SchemaVariant::TranscriptFormat => &TRANSCRIPT_RULES,
    }
}

static PROJECTS_RULES: RuleSet = RuleSet {
    gates: &[
        RecordRule { name: "type-not-user", rejects: type_not_user },
        RecordRule { name: "role-not-user", rejects: role_not_user },
    ],
    noise: &[
        TextRule { name: "caveat", rejects: starts_with_caveat },
        TextRule { name: "command-marker", rejects: contains_command_marker },
        TextRule { name: "bracket-tag", rejects: starts_with_bracket_tag },
        TextRule { name: "log-level-prefix", rejects: starts_with_log_level },
        TextRule { name: "tool-phrase", rejects: contains_tool_phrase },
    ],
};

// Transcript files get a stricter record gate but no heuristic text rules.
static TRANSCRIPT_RULES: RuleSet = RuleSet {
    gates: &[
        RecordRule { name: "type-not-user", rejects: type_not_user },
        RecordRule { name: "type-assistant", rejects: type_is_assistant },
        RecordRule { name: "role-not-user", rejects: role_not_user },
        RecordRule { name: "role-assistant", rejects: role_is_assistant },
        RecordRule { name: "meta", rejects: is_meta },
    ],
    noise: &[
        TextRule { name: "command-marker", rejects: contains_command_marker },
        TextRule { name: "caveat", rejects: starts_with_caveat },
    ],
};

fn type_not_user(record: &LogRecord) -> bool {
    record.record_type() != "user"
}

fn type_is_assistant(record: &LogRecord) -> bool {
    record.record_type() == "assistant"
}

fn role_not_user(record: &LogRecord) -> bool {
    record.role() != "user"
}

fn role_is_assistant(record: &LogRecord) -> bool {
    record.role() == "assistant"
}

fn is_meta(record: &LogRecord) -> bool {
    record.is_meta()
}

fn starts_with_caveat(text: &str) -> bool {
    text.starts_with("Caveat:")
}

fn contains_command_marker(text: &str) -> bool {
    COMMAND_MARKERS.iter().any(|marker| text.contains(marker))
}

fn starts_with_bracket_tag(text: &str) -> bool {
    text.strip_prefix('[').is_some_and(|rest| rest.contains(']'))
}

fn starts_with_log_level(text: &str) -> bool {
    LOG_LEVEL_PREFIXES.iter().any(|prefix| {
        text.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

fn contains_tool_phrase(text: &str) -> bool {
    TOOL_PHRASES.iter().any(|phrase| text.contains(phrase))
}
