//! Per-entry install decision.
use super::manifest::Manifest;
use super::sanitize::SanitizedPath;

/// What to do with one sanitized archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallDecision {
    /// Listed in the manifest and absent on disk.
    Install,
    /// Listed, present on disk, overwrite enabled.
    Overwrite,
    /// Not listed in the manifest.
    SkipExcluded,
    /// Listed, present on disk, overwrite disabled.
    SkipExists,
}

impl InstallDecision {
    /// Whether the decision results in a filesystem write.
    #[must_use]
    pub const fn writes(self) -> bool {
        matches!(self, Self::Install | Self::Overwrite)
    }
}

/// Decide the fate of `path`.
///
/// Pure: the outcome depends only on manifest membership of `path`,
/// `exists_on_disk` and `overwrite`.
#[must_use]
pub fn decide(
    path: &SanitizedPath,
    manifest: &Manifest,
    exists_on_disk: bool,
    overwrite: bool,
) -> InstallDecision {
    decide_membership(manifest.contains(path.as_str()), exists_on_disk, overwrite)
}

/// Decision table over already-evaluated inputs; first matching row wins.
#[must_use]
pub const fn decide_membership(
    in_manifest: bool,
    exists_on_disk: bool,
    overwrite: bool,
) -> InstallDecision {
    match (in_manifest, exists_on_disk, overwrite) {
        (false, _, _) => InstallDecision::SkipExcluded,
        (true, false, _) => InstallDecision::Install,
        (true, true, false) => InstallDecision::SkipExists,
        (true, true, true) => InstallDecision::Overwrite,
    }
}
