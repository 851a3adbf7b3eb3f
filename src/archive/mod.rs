//! Manifest-driven selective extraction.
//!
//! - **[`manifest`]** locates and decodes the whitelist inside the archive
//! - **[`sanitize`]** maps internal entry paths to target-relative paths
//! - **[`decision`]** decides install / overwrite / skip per entry
//! - **[`installer`]** runs the full pass over the primary archive
//! - **[`asset`]** installs one fixed entry from a secondary archive
//! - **[`report`]** collects the per-entry audit trail
pub mod asset;
pub mod decision;
pub mod installer;
pub mod manifest;
pub mod report;
pub mod sanitize;

use std::io::{self, Read, Seek};

use crate::error::ArchiveError;

/// An opened zip archive whose entries are visited in stored order.
pub struct ProjectArchive<R: Read + Seek> {
    inner: zip::ZipArchive<R>,
}

impl<R: Read + Seek> std::fmt::Debug for ProjectArchive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectArchive")
            .field("entries", &self.inner.len())
            .finish()
    }
}

impl<R: Read + Seek> ProjectArchive<R> {
    /// Read the central directory of `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Open`] if `reader` is not a zip archive.
    pub fn open(reader: R) -> Result<Self, ArchiveError> {
        let inner = zip::ZipArchive::new(reader).map_err(|e| ArchiveError::Open(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Number of entries, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the archive has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Borrow the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Entry`] if the entry header cannot be read or
    /// uses an unsupported compression method.
    pub fn entry(&mut self, index: usize) -> Result<ArchiveEntry<'_, R>, ArchiveError> {
        let file = self
            .inner
            .by_index(index)
            .map_err(|e| ArchiveError::Entry {
                index,
                message: e.to_string(),
            })?;
        Ok(ArchiveEntry { file })
    }

    /// Stored path of the entry at `index`, read from the central directory
    /// without decompressing anything.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.inner.name_for_index(index)
    }
}

/// A single archive entry, readable for its (decompressed) content.
pub struct ArchiveEntry<'a, R: Read + Seek> {
    file: zip::read::ZipFile<'a, R>,
}

impl<R: Read + Seek> std::fmt::Debug for ArchiveEntry<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("path", &self.path())
            .field("is_dir", &self.is_dir())
            .finish()
    }
}

impl<R: Read + Seek> ArchiveEntry<'_, R> {
    /// Internal path as stored, including the archive's root folder.
    #[must_use]
    pub fn path(&self) -> &str {
        self.file.name()
    }

    /// Whether the entry is a directory (and therefore has no content).
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.file.is_dir()
    }
}

impl<R: Read + Seek> Read for ArchiveEntry<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
