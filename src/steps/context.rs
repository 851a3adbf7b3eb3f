use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archive::ProjectArchive;
use crate::config::Config;
use crate::error::{FetchError, KaizenError};
use crate::exec::Executor;
use crate::fetch::{Fetcher, Payload};
use crate::logging::Log;

/// Shared context for step execution.
pub struct Context {
    /// Archive sources and the vendor tool.
    pub config: Arc<Config>,
    /// Absolute path of the directory receiving the project.
    pub target: PathBuf,
    /// Replace files that already exist in the target.
    pub overwrite: bool,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Remote archive retrieval.
    pub fetcher: Arc<dyn Fetcher>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("target", &self.target)
            .field("overwrite", &self.overwrite)
            .field("dry_run", &self.dry_run)
            .field("log", &"<dyn Log>")
            .field("fetcher", &"<dyn Fetcher>")
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl Context {
    /// Target directory the steps write into.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Create a copy of this context with a different logger.
    #[must_use]
    pub fn with_log(&self, log: Arc<dyn Log>) -> Self {
        Self {
            config: Arc::clone(&self.config),
            target: self.target.clone(),
            overwrite: self.overwrite,
            dry_run: self.dry_run,
            log,
            fetcher: Arc::clone(&self.fetcher),
            executor: Arc::clone(&self.executor),
        }
    }

    /// Create a copy of this context with a different [`Fetcher`].
    #[cfg(test)]
    #[must_use]
    pub fn with_fetcher(&self, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            ..self.with_log(Arc::clone(&self.log))
        }
    }

    /// Create a copy of this context with a different [`Executor`].
    #[cfg(test)]
    #[must_use]
    pub fn with_executor(&self, executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            ..self.with_log(Arc::clone(&self.log))
        }
    }

    /// Download `url` and open it as a zip archive.
    ///
    /// The returned [`Payload`] owns the temporary file backing the archive;
    /// both are released when the caller drops them.
    ///
    /// # Errors
    ///
    /// Returns [`KaizenError::Fetch`] if the download fails and
    /// [`KaizenError::Archive`] if the payload is not a zip archive.
    pub fn open_remote(&self, url: &str) -> Result<(Payload, ProjectArchive<File>), KaizenError> {
        self.log.info(&format!("Downloading {url}"));
        let payload = self.fetcher.fetch(url)?;
        let file = payload.open().map_err(|source| FetchError::Io {
            url: url.to_string(),
            source,
        })?;
        let archive = ProjectArchive::open(file)?;
        self.log.debug(&format!(
            "{} entries in {}",
            archive.len(),
            payload.path().display()
        ));
        Ok((payload, archive))
    }
}
