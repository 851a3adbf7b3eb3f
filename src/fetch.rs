//! Remote archive retrieval.
//!
//! A [`Fetcher`] turns a URL into a [`Payload`]: the response body spooled to
//! a temporary file that is deleted when the payload is dropped.
use std::fs::File;
use std::io::{self, Read, Seek as _, Write as _};
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::FetchError;

/// TCP connect timeout in seconds.
const CONNECT_TIMEOUT: u64 = 10;

/// Total transfer timeout in seconds.
const TRANSFER_TIMEOUT: u64 = 120;

/// A downloaded archive held in temporary storage.
#[derive(Debug)]
pub struct Payload {
    url: String,
    file: NamedTempFile,
}

impl Payload {
    /// Spool everything `reader` yields into a new temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the temporary file cannot be created or written.
    pub fn from_reader(url: &str, reader: &mut dyn Read) -> Result<Self, FetchError> {
        let io_err = |source| FetchError::Io {
            url: url.to_string(),
            source,
        };
        let mut file = tempfile::Builder::new()
            .prefix("kaizen-")
            .suffix(".zip")
            .tempfile()
            .map_err(io_err)?;
        io::copy(reader, &mut file).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.rewind().map_err(io_err)?;
        Ok(Self {
            url: url.to_string(),
            file,
        })
    }

    /// Build a payload from bytes already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the temporary file cannot be written.
    pub fn from_bytes(url: &str, bytes: &[u8]) -> Result<Self, FetchError> {
        Self::from_reader(url, &mut io::Cursor::new(bytes))
    }

    /// Open an independent read handle positioned at the start of the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be reopened.
    pub fn open(&self) -> io::Result<File> {
        self.file.reopen()
    }

    /// URL the payload was retrieved from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Location of the temporary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Retrieves a remote archive.
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Download `url` into a [`Payload`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] on network, TLS or HTTP status
    /// failures and [`FetchError::Io`] if the body cannot be stored.
    fn fetch(&self, url: &str) -> Result<Payload, FetchError>;
}

/// [`Fetcher`] backed by a blocking [`ureq::Agent`].
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with the default connect and transfer timeouts.
    #[must_use]
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(CONNECT_TIMEOUT)))
            .timeout_global(Some(Duration::from_secs(TRANSFER_TIMEOUT)))
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Payload, FetchError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let mut reader = response.body_mut().as_reader();
        Payload::from_reader(url, &mut reader)
    }
}
