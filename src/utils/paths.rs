use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Resolve a path for containment checks
///
/// Canonicalizes when the path exists. Otherwise falls back to a lexical
/// normalization that drops `.` and resolves `..` against preceding components,
/// so `root/a/../../etc` never looks like it lives under `root`.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Returns true if `path` is `root` itself or lives somewhere beneath it
///
/// Both sides are canonicalized first, so symlinks and `..` components cannot be
/// used to escape the root.
pub fn is_within(root: &Path, path: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Turn a session id into a safe cache file name
///
/// Anything other than ASCII alphanumerics and `-` becomes `_`, so ids can never
/// introduce path separators or `..` into the cache directory.
pub fn sanitize_cache_key(session_id: &str) -> Cow<'_, str> {
    if session_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Cow::Borrowed(session_id);
    }
    Cow::Owned(
        session_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect(),
    )
}

/// Last path component of a working directory, used as the project name
pub fn project_name_from_cwd(cwd: &str) -> Option<String> {
    Path::new(cwd)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
