//! Static preview of a generated project.
//!
//! [`PreviewResponder`] maps a request path to a file under its root and
//! builds the response; [`server::PreviewServer`] feeds it requests read off
//! a TCP socket.  The root is an explicit value owned by the responder.
pub mod mime;
pub mod server;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mime::mime_for;

/// File served for a request with no path segments.
pub const INDEX_FILE: &str = "index.html";

/// Headers attached to every response so browsers always refetch.
pub const NO_CACHE_HEADERS: &[(&str, &str)] = &[
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// A complete response ready to be written to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Empty response with `status`.
    #[must_use]
    pub const fn empty(status: u16, content_type: &'static str) -> Self {
        Self {
            status,
            content_type,
            body: Vec::new(),
        }
    }

    /// Reason phrase for the status line.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "",
        }
    }

    /// Serialize as an HTTP/1.1 response. `include_body` is false for `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_to(&self, out: &mut dyn Write, include_body: bool) -> io::Result<()> {
        write!(out, "HTTP/1.1 {} {}\r\n", self.status, self.reason())?;
        write!(out, "Content-Type: {}\r\n", self.content_type)?;
        write!(out, "Content-Length: {}\r\n", self.body.len())?;
        for (name, value) in NO_CACHE_HEADERS {
            write!(out, "{name}: {value}\r\n")?;
        }
        out.write_all(b"Connection: close\r\n\r\n")?;
        if include_body {
            out.write_all(&self.body)?;
        }
        out.flush()
    }
}

/// Resolves request paths against a fixed root directory.
#[derive(Debug, Clone)]
pub struct PreviewResponder {
    root: PathBuf,
}

impl PreviewResponder {
    /// Serve files from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory files are served from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request path to a file path under the root.
    ///
    /// Empty segments are dropped and a path with no segments maps to
    /// [`INDEX_FILE`].  Returns `None` for a path containing `..`.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let path = request_path.split(['?', '#']).next().unwrap_or_default();
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.iter().any(|p| *p == ".." || p.contains('\\')) {
            return None;
        }
        if parts.is_empty() {
            parts.push(INDEX_FILE);
        }
        Some(parts.iter().fold(self.root.clone(), |acc, p| acc.join(p)))
    }

    /// Build the response for `request_path`.
    ///
    /// The content type follows the requested file's extension whether or
    /// not the file exists.
    #[must_use]
    pub fn respond(&self, request_path: &str) -> Response {
        let Some(file) = self.resolve(request_path) else {
            return Response::empty(404, mime::DEFAULT_MIME);
        };
        let content_type = mime_for(&file);
        if !file.is_file() {
            return Response::empty(404, content_type);
        }
        match std::fs::read(&file) {
            Ok(body) => Response {
                status: 200,
                content_type,
                body,
            },
            Err(_) => Response::empty(404, content_type),
        }
    }
}
