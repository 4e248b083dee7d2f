use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

const DEFAULT_MAX_TEXT_LENGTH: usize = 200;
const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4096;
const MIN_MESSAGE_LENGTH: usize = 16;
const CACHE_DIR_NAME: &str = "session-enricher";

pub const DEBUG_VAR: &str = "ENRICHER_DEBUG";

/// Runtime settings, read once from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Canonical projects-log root (`~/.claude/projects`)
    pub projects_dir: PathBuf,
    /// Per-entry truncation length, in characters
    pub max_text_length: usize,
    /// Size budget for rendered notifications, in characters
    pub max_message_length: usize,
    pub unknown_project: String,
    pub unknown_session: String,
    pub unknown_message: String,
    /// Directory for the session lookup cache; `None` disables the file cache
    pub cache_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let projects_dir = match var("CLAUDE_PROJECTS_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = var("HOME").context("HOME environment variable not set")?;
                PathBuf::from(home).join(".claude").join("projects")
            }
        };

        let cache_dir = var("ENRICHER_CACHE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::cache_dir().map(|d| d.join(CACHE_DIR_NAME)));

        Ok(Self {
            projects_dir,
            max_text_length: parse_length(
                "ENRICHER_MAX_TEXT_LENGTH",
                var("ENRICHER_MAX_TEXT_LENGTH"),
                DEFAULT_MAX_TEXT_LENGTH,
                1,
            ),
            max_message_length: parse_length(
                "ENRICHER_MAX_MESSAGE_LENGTH",
                var("ENRICHER_MAX_MESSAGE_LENGTH"),
                DEFAULT_MAX_MESSAGE_LENGTH,
                MIN_MESSAGE_LENGTH,
            ),
            unknown_project: var("ENRICHER_UNKNOWN_PROJECT").unwrap_or_else(|| "unknown".into()),
            unknown_session: var("ENRICHER_UNKNOWN_SESSION").unwrap_or_else(|| "unknown".into()),
            unknown_message: var("ENRICHER_UNKNOWN_MESSAGE")
                .unwrap_or_else(|| "No message".into()),
            cache_dir,
        })
    }
}

/// Whether the debug toggle is set
///
/// Read on its own, ahead of [`Settings`], so that logging is installed before
/// settings parsing can warn.
pub fn debug_from_env() -> bool {
    debug_from_vars(|key| env::var(key).ok())
}

pub fn debug_from_vars<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(DEBUG_VAR).is_some_and(|v| is_truthy(&v))
}

fn parse_length(key: &str, raw: Option<String>, default: usize, min: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= min => n,
        _ => {
            warn!(key, value = %raw, default, "invalid length setting, using default");
            default
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
