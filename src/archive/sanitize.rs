//! Entry path sanitization and target-path containment.
//!
//! Sanitizing removes *every* occurrence of the archive's root-folder name
//! from an entry path, not only the leading one, so
//! `Kaizen-master/docs/Kaizen-master.md` becomes `/docs/.md`.  Manifests are
//! written against this exact form, so the behaviour is kept as is.
use std::path::{Component, Path, PathBuf};

use crate::error::InstallError;

/// What sanitizing the root folder entry itself produces.
pub const ROOT_SENTINEL: &str = "/";

/// An entry path with the archive root-folder name removed.
///
/// Usually starts with `/` (e.g. `/scss/main.scss`); compared bit-for-bit
/// against manifest entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedPath(String);

impl SanitizedPath {
    /// The sanitized path as compared against the manifest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path with leading separators removed, relative to the target.
    #[must_use]
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl std::fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip `root_folder` from `entry_path`.
///
/// Returns `None` for the root folder entry itself (the result would be
/// [`ROOT_SENTINEL`] or empty); such entries are skipped without being
/// evaluated or reported.
#[must_use]
pub fn sanitize(entry_path: &str, root_folder: &str) -> Option<SanitizedPath> {
    let stripped = if root_folder.is_empty() {
        entry_path.to_string()
    } else {
        entry_path.replace(root_folder, "")
    };
    if stripped.is_empty() || stripped == ROOT_SENTINEL {
        return None;
    }
    Some(SanitizedPath(stripped))
}

/// Join `relative` onto `target`, refusing anything that could leave it.
///
/// Only plain (`Normal`) components and `.` are accepted; `..`, absolute
/// roots and drive prefixes are rejected.
#[must_use]
pub fn join_within(target: &Path, relative: &Path) -> Option<PathBuf> {
    let mut resolved = target.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Resolve the on-disk destination of a sanitized entry.
///
/// # Errors
///
/// Returns [`InstallError::PathEscapesTarget`] if the path would land
/// outside `target`.
pub fn resolve_target(target: &Path, path: &SanitizedPath) -> Result<PathBuf, InstallError> {
    join_within(target, Path::new(path.relative())).ok_or_else(|| {
        InstallError::PathEscapesTarget {
            path: path.as_str().to_string(),
        }
    })
}

/// Destination used when reporting an entry, even one that is never written.
#[must_use]
pub fn display_target(target: &Path, path: &SanitizedPath) -> PathBuf {
    target.join(path.relative())
}
