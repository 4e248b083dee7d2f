use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Which record shape a log file is parsed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Files living under the canonical projects-log root
    ProjectsFormat,
    /// Files handed over directly as a transcript path
    TranscriptFormat,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::ProjectsFormat => "projects",
            SchemaVariant::TranscriptFormat => "transcript",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete log file plus the schema variant to read it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub path: PathBuf,
    pub variant: SchemaVariant,
}
