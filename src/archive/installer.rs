//! Full install pass over the primary project archive.
use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;

use super::ProjectArchive;
use super::decision::{InstallDecision, decide};
use super::manifest::{self, Manifest};
use super::report::{InstallReport, Outcome, ReportEntry};
use super::sanitize::{SanitizedPath, display_target, resolve_target, sanitize};
use crate::config::ProjectSource;
use crate::error::{InstallError, ManifestError};
use crate::logging::Log;

/// Per-run switches of an install pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Replace files that already exist in the target.
    pub overwrite: bool,
    /// Decide and report only; write nothing.
    pub dry_run: bool,
}

/// Install every manifest-listed entry of `archive` under `target`.
///
/// Entries are processed in stored order.  A failure to write one entry is
/// recorded in the report and processing continues with the next.
///
/// # Errors
///
/// Returns a [`ManifestError`] when the archive has no usable manifest; in
/// that case nothing has been written.
pub fn install_project<R: Read + Seek>(
    archive: &mut ProjectArchive<R>,
    source: &ProjectSource,
    target: &Path,
    options: InstallOptions,
    log: &dyn Log,
) -> Result<InstallReport, ManifestError> {
    let manifest = manifest::load(archive, source)?;
    log.debug(&format!(
        "manifest lists {} paths, archive has {} entries",
        manifest.len(),
        archive.len()
    ));
    for listed in manifest.iter() {
        log.debug(&format!("  listed: {listed}"));
    }

    let mut report = InstallReport::default();
    for index in 0..archive.len() {
        let stored = archive
            .name(index)
            .map_or_else(|| format!("#{index}"), str::to_string);
        let entry = match archive.entry(index) {
            Ok(mut entry) => {
                let Some(path) = sanitize(entry.path(), &source.root_folder) else {
                    continue;
                };
                let is_dir = entry.is_dir();
                let outcome = install_entry(&mut entry, &path, is_dir, &manifest, target, options);
                ReportEntry {
                    archive_path: path.as_str().to_string(),
                    target: display_target(target, &path),
                    outcome,
                }
            }
            Err(err) => ReportEntry {
                archive_path: stored,
                target: target.to_path_buf(),
                outcome: Outcome::Failed(err.into()),
            },
        };
        entry.log(log, options.dry_run);
        report.push(entry);
    }
    Ok(report)
}

fn install_entry(
    content: &mut dyn Read,
    path: &SanitizedPath,
    is_dir: bool,
    manifest: &Manifest,
    target: &Path,
    options: InstallOptions,
) -> Outcome {
    let destination = resolve_target(target, path);
    let exists = destination
        .as_deref()
        .is_ok_and(|dest| dest.symlink_metadata().is_ok());

    let decision = decide(path, manifest, exists, options.overwrite);
    let planned = match decision {
        InstallDecision::SkipExcluded => Outcome::Excluded,
        InstallDecision::SkipExists => Outcome::SkippedExists,
        InstallDecision::Install => Outcome::Installed,
        InstallDecision::Overwrite => Outcome::Overwritten,
    };
    if !decision.writes() {
        return planned;
    }

    let result = destination.and_then(|dest| {
        if options.dry_run {
            Ok(())
        } else if is_dir {
            create_dir(&dest)
        } else {
            write_file(content, &dest)
        }
    });
    match result {
        Ok(()) => planned,
        Err(err) => Outcome::Failed(err),
    }
}

fn create_dir(dest: &Path) -> Result<(), InstallError> {
    fs::create_dir_all(dest).map_err(|source| InstallError::FileWrite {
        path: dest.to_path_buf(),
        source,
    })
}

/// Write `content` to `dest` through a sibling temp file, so an existing
/// file is either fully replaced or left untouched.
pub(crate) fn write_file(content: &mut dyn Read, dest: &Path) -> Result<(), InstallError> {
    let fail = |source: io::Error| InstallError::FileWrite {
        path: dest.to_path_buf(),
        source,
    };
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(fail)?;
    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(fail)?;
    io::copy(content, &mut staged).map_err(fail)?;
    staged.persist(dest).map_err(|e| fail(e.error))?;
    Ok(())
}
