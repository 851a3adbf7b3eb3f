//! Per-entry audit trail of an install pass.
use std::fmt;
use std::path::PathBuf;

use crate::error::InstallError;
use crate::logging::Log;

/// What happened to one archive entry.
#[derive(Debug)]
pub enum Outcome {
    /// Written to a previously absent destination.
    Installed,
    /// Written over an existing destination.
    Overwritten,
    /// Not listed in the manifest; nothing written.
    Excluded,
    /// Listed but already present and overwrite is off; nothing written.
    SkippedExists,
    /// The write was attempted (or refused) and failed.
    Failed(InstallError),
}

/// Data-free discriminant of [`Outcome`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// See [`Outcome::Installed`].
    Installed,
    /// See [`Outcome::Overwritten`].
    Overwritten,
    /// See [`Outcome::Excluded`].
    Excluded,
    /// See [`Outcome::SkippedExists`].
    SkippedExists,
    /// See [`Outcome::Failed`].
    Failed,
}

impl Outcome {
    /// The outcome's kind.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Installed => OutcomeKind::Installed,
            Self::Overwritten => OutcomeKind::Overwritten,
            Self::Excluded => OutcomeKind::Excluded,
            Self::SkippedExists => OutcomeKind::SkippedExists,
            Self::Failed(_) => OutcomeKind::Failed,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Installed => "installed",
            Self::Overwritten => "overwritten",
            Self::Excluded => "excluded",
            Self::SkippedExists => "skipped-exists",
            Self::Failed => "error",
        })
    }
}

/// One line of the audit trail.
#[derive(Debug)]
pub struct ReportEntry {
    /// Sanitized archive path, or the stored name when the entry is unreadable.
    pub archive_path: String,
    /// Destination under the target directory.
    pub target: PathBuf,
    /// What happened.
    pub outcome: Outcome,
}

impl ReportEntry {
    /// Emit this entry through `log` at a level matching its outcome.
    pub fn log(&self, log: &dyn Log, dry_run: bool) {
        let path = self.target.display();
        match &self.outcome {
            Outcome::Installed if dry_run => log.dry_run(&format!("would install {path}")),
            Outcome::Overwritten if dry_run => log.dry_run(&format!("would overwrite {path}")),
            Outcome::Installed => log.info(&format!("Installed: {path}")),
            Outcome::Overwritten => log.info(&format!("Overwritten: {path}")),
            Outcome::Excluded => log.warn(&format!("Excluded: {path}")),
            Outcome::SkippedExists => log.warn(&format!("File already exists: {path}")),
            Outcome::Failed(err) => log.error(&err.to_string()),
        }
    }
}

/// Ordered collection of [`ReportEntry`] values for one pass.
#[derive(Debug, Default)]
pub struct InstallReport {
    entries: Vec<ReportEntry>,
}

impl InstallReport {
    /// Append an entry.
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// All entries in processing order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of entries with the given outcome kind.
    #[must_use]
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.kind() == kind)
            .count()
    }

    /// Sanitized paths of entries with the given outcome kind.
    #[must_use]
    pub fn paths(&self, kind: OutcomeKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.outcome.kind() == kind)
            .map(|e| e.archive_path.as_str())
            .collect()
    }

    /// Entries whose write failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome.kind() == OutcomeKind::Failed)
    }

    /// One-line tally, e.g. `3 installed, 0 overwritten, 1 excluded, 0 skipped-exists, 0 error`.
    #[must_use]
    pub fn summary(&self) -> String {
        [
            OutcomeKind::Installed,
            OutcomeKind::Overwritten,
            OutcomeKind::Excluded,
            OutcomeKind::SkippedExists,
            OutcomeKind::Failed,
        ]
        .iter()
        .map(|kind| format!("{} {kind}", self.count(*kind)))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{:<14} {}", entry.outcome.kind(), entry.archive_path)?;
        }
        write!(f, "{}", self.summary())
    }
}
