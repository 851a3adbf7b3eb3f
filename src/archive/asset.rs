//! Single-entry install from a secondary archive.
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::ProjectArchive;
use super::installer::write_file;
use super::sanitize::join_within;
use crate::config::StylesheetSource;
use crate::error::{ArchiveError, InstallError};
use crate::logging::Log;

/// Result of a secondary asset install.
#[derive(Debug)]
pub enum AssetOutcome {
    /// The entry was written to the destination (or would be, in a dry run).
    Installed(PathBuf),
    /// The destination already exists; nothing was done.
    AlreadyPresent(PathBuf),
    /// The archive does not contain the entry.
    EntryNotFound,
    /// Writing the destination failed.
    Failed(InstallError),
}

/// Install `source.entry` from `archive` to `source.destination` under
/// `target`, unless the destination already exists.
///
/// # Errors
///
/// Returns [`ArchiveError`] if the matching entry cannot be opened.
pub fn install_asset<R: Read + Seek>(
    archive: &mut ProjectArchive<R>,
    source: &StylesheetSource,
    target: &Path,
    dry_run: bool,
    log: &dyn Log,
) -> Result<AssetOutcome, ArchiveError> {
    let Some(dest) = join_within(target, &source.destination) else {
        let err = InstallError::PathEscapesTarget {
            path: source.destination.display().to_string(),
        };
        log.error(&err.to_string());
        return Ok(AssetOutcome::Failed(err));
    };
    if dest.symlink_metadata().is_ok() {
        log.debug(&format!("{} already present", dest.display()));
        return Ok(AssetOutcome::AlreadyPresent(dest));
    }

    let wanted = source.entry.as_str();
    let Some(index) = (0..archive.len()).find(|&index| {
        archive
            .name(index)
            .is_some_and(|name| name == wanted && !name.ends_with('/'))
    }) else {
        log.warn(&format!("'{}' not found in {}", source.entry, source.url));
        return Ok(AssetOutcome::EntryNotFound);
    };
    if dry_run {
        log.dry_run(&format!("would install {}", dest.display()));
        return Ok(AssetOutcome::Installed(dest));
    }

    let mut entry = archive.entry(index)?;
    Ok(match write_file(&mut entry, &dest) {
        Ok(()) => {
            log.info(&format!("Installed: {}", dest.display()));
            AssetOutcome::Installed(dest)
        }
        Err(err) => {
            log.error(&err.to_string());
            AssetOutcome::Failed(err)
        }
    })
}
