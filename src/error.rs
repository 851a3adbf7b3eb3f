//! Domain-specific error types for the kaizen installer.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ManifestError`], [`InstallError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! KaizenError                  : fetching and opening a remote archive
//! ├── Fetch(FetchError)        : remote archive retrieval
//! └── Archive(ArchiveError)    : opening or reading a zip payload
//!
//! ConfigError                  : config file, target directory
//! ManifestError                : whitelist lookup and decoding
//! InstallError                 : per-entry filesystem writes
//! ToolError                    : external install command
//! ```
//!
//! Only [`ConfigError`], [`FetchError`], [`ArchiveError`] and
//! [`ManifestError`] abort the step that raised them.  [`InstallError`] is
//! always attached to a single report entry and never stops a pass.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a readable archive from a remote source.
#[derive(Error, Debug)]
pub enum KaizenError {
    /// Remote archive could not be retrieved.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Downloaded payload could not be read as an archive.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// Errors that arise from loading the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected schema.
    #[error("Invalid config file {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The installation target directory does not exist.
    #[error("The directory does not exist: {0}")]
    TargetMissing(PathBuf),
}

/// Transport failures while retrieving a remote archive.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, DNS, TLS or non-success HTTP status.
    #[error("failed to download {url}: {reason}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Human-readable transport failure.
        reason: String,
    },

    /// The response body could not be spooled to temporary storage.
    #[error("failed to store download of {url}: {source}")]
    Io {
        /// URL that was requested.
        url: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Failures while opening or enumerating a zip payload.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The payload is not a readable zip archive.
    #[error("cannot open archive: {0}")]
    Open(String),

    /// An individual entry could not be read.
    #[error("cannot read archive entry #{index}: {message}")]
    Entry {
        /// Position of the entry in enumeration order.
        index: usize,
        /// Reader message.
        message: String,
    },
}

/// Failures of the manifest loader.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No `<root>/*.<ext>` resource exists in the archive.
    #[error("Manifest file '{pattern}' not found")]
    Missing {
        /// The pattern that was searched for.
        pattern: String,
    },

    /// The manifest resource does not decode to a list of strings.
    #[error("Manifest file '{name}' is malformed: {message}")]
    Malformed {
        /// Internal archive path of the manifest.
        name: String,
        /// Decoder message.
        message: String,
    },

    /// The manifest resource could not be read out of the archive.
    #[error("Manifest file '{name}' could not be read: {message}")]
    Read {
        /// Internal archive path of the manifest.
        name: String,
        /// Reader message.
        message: String,
    },
}

/// Per-entry failures during an install pass.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Writing the entry to its destination failed.
    #[error("Unable to write {path}: {source}")]
    FileWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The sanitized entry path would land outside the target directory.
    #[error("Refusing to write outside the target directory: {path}")]
    PathEscapesTarget {
        /// The sanitized archive path.
        path: String,
    },

    /// The entry could not be read out of the archive.
    #[error("Unable to read archive entry: {0}")]
    Unreadable(#[from] ArchiveError),
}

/// Failures of the external install command.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program is not available on `PATH`.
    #[error("'{program}' was not found on PATH")]
    NotFound {
        /// Program name.
        program: String,
    },

    /// The program could not be started.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program exited with a non-zero status.
    #[error("{program} failed (exit {code}): {stderr}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
        /// Captured standard error output.
        stderr: String,
    },
}
