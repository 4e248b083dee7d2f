//! Session log resolution
//!
//! Turns the sparse identifiers found in a hook payload (a session id and/or a
//! transcript path) into exactly one log file, trying in order:
//!
//! 1. the transcript path itself, when it names an existing file
//! 2. a cached content-stage hit for the session id, when the file still exists
//! 3. a file named `<session_id>.jsonl` beneath the search root
//! 4. any `*.jsonl` beneath the search root containing `"sessionId": "<session_id>"`
//!
//! The search root is the transcript path's directory when that directory exists
//! inside the projects root, and the whole projects root otherwise. Misses are not
//! errors: [`SessionLocator::resolve`] simply returns `None`.

pub mod cache;
pub mod search;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use cache::{FileCache, LookupCache, MemoryCache};

use crate::models::{ResolvedSession, SchemaVariant};
use crate::utils::is_within;

/// Treat empty and literal `"null"` payload fields as absent
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "null")
}

pub struct SessionLocator<C> {
    projects_root: PathBuf,
    cache: C,
    scans: usize,
}

impl<C: LookupCache> SessionLocator<C> {
    pub fn new(projects_root: impl Into<PathBuf>, cache: C) -> Self {
        Self { projects_root: projects_root.into(), cache, scans: 0 }
    }

    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Number of directory walks performed so far
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn resolve(
        &mut self,
        session_id: Option<&str>,
        transcript_path: Option<&str>,
    ) -> Option<ResolvedSession> {
        let session_id = present(session_id);
        let transcript_path = present(transcript_path);

        if let Some(path) = transcript_path.map(PathBuf::from).filter(|p| p.is_file()) {
            let variant = self.variant_for(&path);
            debug!(path = %path.display(), %variant, "resolved from transcript path");
            return Some(ResolvedSession { path, variant });
        }

        let Some(session_id) = session_id else {
            debug!("no usable session id or transcript path");
            return None;
        };

        if let Some(path) = self.cache.get(session_id).filter(|p| p.is_file()) {
            debug!(session_id, path = %path.display(), "resolved from cache");
            return Some(ResolvedSession { variant: self.variant_for(&path), path });
        }

        let root = self.search_root(transcript_path);

        self.scans += 1;
        if let Some(path) = search::find_by_filename(&root, session_id) {
            debug!(session_id, path = %path.display(), "resolved by file name");
            return Some(ResolvedSession { path, variant: SchemaVariant::ProjectsFormat });
        }

        self.scans += 1;
        if let Some(path) = search::find_by_content(&root, session_id) {
            debug!(session_id, path = %path.display(), "resolved by content");
            if let Err(e) = self.cache.put(session_id, &path) {
                warn!(session_id, error = %format!("{:#}", e), "failed to cache resolution");
            }
            return Some(ResolvedSession { path, variant: SchemaVariant::ProjectsFormat });
        }

        debug!(session_id, root = %root.display(), "session log not found");
        None
    }

    fn variant_for(&self, path: &Path) -> SchemaVariant {
        if is_within(&self.projects_root, path) {
            SchemaVariant::ProjectsFormat
        } else {
            SchemaVariant::TranscriptFormat
        }
    }

    /// Narrow the search to the transcript's directory when it is a real directory
    /// inside the projects root
    fn search_root(&self, transcript_path: Option<&str>) -> PathBuf {
        let candidate = transcript_path.and_then(|p| Path::new(p).parent()).filter(|dir| {
            !dir.as_os_str().is_empty() && dir.is_dir() && is_within(&self.projects_root, dir)
        });

        match candidate {
            Some(dir) => dir.to_path_buf(),
            None => self.projects_root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn locator(root: &Path) -> SessionLocator<MemoryCache> {
        SessionLocator::new(root, MemoryCache::new())
    }

    #[test]
    fn test_present() {
        assert_eq!(present(Some("abc")), Some("abc"));
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("null")), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_transcript_path_outside_root_is_transcript_format() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let transcript = elsewhere.path().join("t.jsonl");
        write(&transcript, "");

        let mut locator = locator(root.path());
        let resolved = locator.resolve(None, transcript.to_str()).unwrap();
        assert_eq!(resolved.path, transcript);
        assert_eq!(resolved.variant, SchemaVariant::TranscriptFormat);
        assert_eq!(locator.scan_count(), 0);
    }

    #[test]
    fn test_transcript_path_inside_root_is_projects_format() {
        let root = TempDir::new().unwrap();
        let transcript = root.path().join("proj/s.jsonl");
        write(&transcript, "");

        let resolved = locator(root.path()).resolve(None, transcript.to_str()).unwrap();
        assert_eq!(resolved.variant, SchemaVariant::ProjectsFormat);
    }

    #[test]
    fn test_both_empty_is_not_found() {
        let root = TempDir::new().unwrap();
        let mut locator = locator(root.path());
        assert!(locator.resolve(None, None).is_none());
        assert!(locator.resolve(Some("null"), Some("")).is_none());
        assert_eq!(locator.scan_count(), 0);
    }

    #[test]
    fn test_filename_stage_beats_content_stage() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("a/other.jsonl"), "{\"sessionId\":\"s1\"}\n");
        let named = root.path().join("b/s1.jsonl");
        write(&named, "");

        let mut locator = locator(root.path());
        let resolved = locator.resolve(Some("s1"), None).unwrap();
        assert_eq!(resolved.path, named);
        assert_eq!(resolved.variant, SchemaVariant::ProjectsFormat);
        // Filename hits are not cached
        assert!(locator.cache().is_empty());
    }

    #[test]
    fn test_content_stage_hit_is_cached() {
        let root = TempDir::new().unwrap();
        let log = root.path().join("p/log.jsonl");
        write(&log, "{\"sessionId\":\"s2\"}\n");

        let mut locator = locator(root.path());
        assert_eq!(locator.resolve(Some("s2"), None).unwrap().path, log);
        assert_eq!(locator.scan_count(), 2);
        assert_eq!(locator.cache().get("s2"), Some(log.clone()));

        assert_eq!(locator.resolve(Some("s2"), None).unwrap().path, log);
        assert_eq!(locator.scan_count(), 2);
    }

    #[test]
    fn test_stale_cache_entry_is_ignored() {
        let root = TempDir::new().unwrap();
        let log = root.path().join("p/log.jsonl");
        write(&log, "{\"sessionId\":\"s3\"}\n");

        let mut cache = MemoryCache::new();
        cache.put("s3", &root.path().join("gone.jsonl")).unwrap();
        let mut locator = SessionLocator::new(root.path(), cache);

        assert_eq!(locator.resolve(Some("s3"), None).unwrap().path, log);
        assert_eq!(locator.scan_count(), 2);
    }

    #[test]
    fn test_missing_transcript_narrows_search_root() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("a/s4.jsonl"), "");
        let narrowed = root.path().join("b/s4.jsonl");
        write(&narrowed, "");

        let hint = root.path().join("b/missing.jsonl");
        let resolved = locator(root.path()).resolve(Some("s4"), hint.to_str()).unwrap();
        assert_eq!(resolved.path, narrowed);
    }

    #[test]
    fn test_transcript_dir_outside_root_is_not_used_as_search_root() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        write(&elsewhere.path().join("s5.jsonl"), "");
        let in_root = root.path().join("p/s5.jsonl");
        write(&in_root, "");

        let hint = elsewhere.path().join("missing.jsonl");
        let resolved = locator(root.path()).resolve(Some("s5"), hint.to_str()).unwrap();
        assert_eq!(resolved.path, in_root);
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("p/log.jsonl"), "{\"sessionId\":\"other\"}\n");
        assert!(locator(root.path()).resolve(Some("does-not-exist"), None).is_none());
    }
}
