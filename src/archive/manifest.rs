//! Whitelist of installable paths shipped inside the primary archive.
//!
//! The manifest is a YAML document at `<root>/<name>.<ext>` whose top level
//! must be a list of strings, each one a sanitized entry path such as
//! `/scss/main.scss`.
use std::collections::HashSet;
use std::io::{Read, Seek};

use super::ProjectArchive;
use crate::config::ProjectSource;
use crate::error::ManifestError;

/// The set of sanitized paths the target may receive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl Manifest {
    /// Build a manifest from already-decoded entries.
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        let entries: Vec<String> = entries.into_iter().collect();
        let index = entries.iter().cloned().collect();
        Self { entries, index }
    }

    /// Decode the manifest document `text` read from archive entry `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Malformed`] unless the top-level value is a
    /// list of strings.
    pub fn from_yaml(name: &str, text: &str) -> Result<Self, ManifestError> {
        let entries: Vec<String> =
            serde_yaml::from_str(text).map_err(|e| ManifestError::Malformed {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(entries))
    }

    /// Exact-string membership test.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains(path)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries in the document (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `name` is a manifest candidate: a file directly inside the root
/// folder with the manifest extension.
#[must_use]
pub fn is_manifest_entry(name: &str, source: &ProjectSource) -> bool {
    let Some(rest) = name
        .strip_prefix(source.root_folder.as_str())
        .and_then(|r| r.strip_prefix('/'))
    else {
        return false;
    };
    let Some(stem) = rest.strip_suffix(source.manifest_extension.as_str()) else {
        return false;
    };
    stem.ends_with('.') && !rest.contains('/')
}

/// Locate and decode the manifest inside `archive`.
///
/// The first candidate in stored order wins.
///
/// # Errors
///
/// Returns [`ManifestError::Missing`] when no candidate exists,
/// [`ManifestError::Read`] when it cannot be read, and
/// [`ManifestError::Malformed`] when it does not decode to a list of strings.
pub fn load<R: Read + Seek>(
    archive: &mut ProjectArchive<R>,
    source: &ProjectSource,
) -> Result<Manifest, ManifestError> {
    let Some((index, name)) = (0..archive.len()).find_map(|index| {
        archive
            .name(index)
            .filter(|name| is_manifest_entry(name, source))
            .map(|name| (index, name.to_string()))
    }) else {
        return Err(ManifestError::Missing {
            pattern: source.manifest_pattern(),
        });
    };
    let unreadable = |message: String| ManifestError::Read {
        name: name.clone(),
        message,
    };

    let mut entry = archive.entry(index).map_err(|e| unreadable(e.to_string()))?;
    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| unreadable(e.to_string()))?;
    Manifest::from_yaml(&name, &text)
}
