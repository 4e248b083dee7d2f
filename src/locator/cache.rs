//! Session-id lookup caches
//!
//! The locator only caches content-stage hits; the cache itself is a plain
//! get/put map. Entries never expire: the locator re-checks that a cached path
//! still exists before trusting it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::utils::sanitize_cache_key;

pub trait LookupCache {
    fn get(&self, session_id: &str) -> Option<PathBuf>;
    fn put(&mut self, session_id: &str, path: &Path) -> Result<()>;
}

impl<C: LookupCache + ?Sized> LookupCache for Box<C> {
    fn get(&self, session_id: &str) -> Option<PathBuf> {
        (**self).get(session_id)
    }

    fn put(&mut self, session_id: &str, path: &Path) -> Result<()> {
        (**self).put(session_id, path)
    }
}

/// Process-local cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, PathBuf>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LookupCache for MemoryCache {
    fn get(&self, session_id: &str) -> Option<PathBuf> {
        self.entries.get(session_id).cloned()
    }

    fn put(&mut self, session_id: &str, path: &Path) -> Result<()> {
        self.entries.insert(session_id.to_string(), path.to_path_buf());
        Ok(())
    }
}

/// Cache shared across invocations: one small file per session id, holding the id
/// and the resolved path on separate lines
///
/// File names are sanitized, so distinct ids can share a file. The stored id must
/// match the requested one for an entry to count as a hit.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("session-{}.path", sanitize_cache_key(session_id)))
    }
}

impl LookupCache for FileCache {
    fn get(&self, session_id: &str) -> Option<PathBuf> {
        let raw = fs::read_to_string(self.entry_path(session_id)).ok()?;
        let mut lines = raw.lines();
        if lines.next()? != session_id {
            return None;
        }
        let path = lines.next().filter(|line| !line.is_empty())?;
        Some(PathBuf::from(path))
    }

    fn put(&mut self, session_id: &str, path: &Path) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create cache directory: {}", self.dir.display())
        })?;

        // Write atomically (temp file + rename)
        let entry = self.entry_path(session_id);
        let temp = entry.with_extension("path.tmp");
        fs::write(&temp, format!("{}\n{}\n", session_id, path.display()))
            .context("Failed to write cache temp file")?;
        fs::rename(&temp, &entry).context("Failed to rename cache temp file")?;
        Ok(())
    }
}
