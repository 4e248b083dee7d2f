//! Recursive discovery of session logs beneath a search root
//!
//! Both stages walk the tree in lexicographic order (per directory) so that the
//! first match is deterministic. Symlinks are not followed, and symlinked files
//! are never candidates.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::bytes::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const LOG_EXTENSION: &str = "jsonl";

fn log_files(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == LOG_EXTENSION))
}

/// Filename stage: first file literally named `<session_id>.jsonl`
pub fn find_by_filename(root: &Path, session_id: &str) -> Option<PathBuf> {
    let target = format!("{}.{}", session_id, LOG_EXTENSION);
    log_files(root).find(|entry| entry.file_name() == target.as_str()).map(DirEntry::into_path)
}

/// Pattern matching a `"sessionId": "<id>"` pair, with the id taken literally
pub fn session_id_pattern(session_id: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r#""sessionId"\s*:\s*"{}""#, regex::escape(session_id)))
}

/// Content stage: first log file with a line mentioning the session id
pub fn find_by_content(root: &Path, session_id: &str) -> Option<PathBuf> {
    let pattern = match session_id_pattern(session_id) {
        Ok(pattern) => pattern,
        Err(e) => {
            debug!(error = %e, "cannot build session id pattern");
            return None;
        }
    };
    log_files(root).find(|entry| file_mentions(entry.path(), &pattern)).map(DirEntry::into_path)
}

fn file_mentions(path: &Path, pattern: &Regex) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open candidate log");
            return false;
        }
    };

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return false,
            Ok(_) if pattern.is_match(&line) => return true,
            Ok(_) => {}
            Err(e) => {
                debug!(path = %path.display(), error = %e, "read error in candidate log");
                return false;
            }
        }
    }
}
