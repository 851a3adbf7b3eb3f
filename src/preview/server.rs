//! Blocking, one-connection-at-a-time HTTP loop around [`PreviewResponder`].
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::{PreviewResponder, Response, mime};
use crate::logging::Log;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 9191;

/// Read timeout for a single request.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// A bound preview server.
#[derive(Debug)]
pub struct PreviewServer {
    listener: TcpListener,
    responder: PreviewResponder,
}

impl PreviewServer {
    /// Bind to `addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub fn bind(addr: impl ToSocketAddrs, responder: PreviewResponder) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            responder,
        })
    }

    /// Address actually bound (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and answer exactly one connection.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting fails.  Errors talking to the client are
    /// logged and swallowed.
    pub fn serve_one(&self, log: &dyn Log) -> io::Result<()> {
        let (stream, _) = self.listener.accept()?;
        self.answer(stream, log);
        Ok(())
    }

    /// Serve connections until the process is stopped.
    ///
    /// A failed accept is logged and the loop moves on to the next
    /// connection.
    pub fn serve(&self, log: &dyn Log) {
        for stream in self.listener.incoming() {
            self.accept(stream, log);
        }
    }

    fn accept(&self, stream: io::Result<TcpStream>, log: &dyn Log) {
        match stream {
            Ok(stream) => self.answer(stream, log),
            Err(e) => log.warn(&format!("accept failed: {e}")),
        }
    }

    fn answer(&self, stream: TcpStream, log: &dyn Log) {
        let peer = stream
            .peer_addr()
            .map_or_else(|_| "client".to_string(), |a| a.to_string());
        if let Err(e) = self.handle(stream, log) {
            log.debug(&format!("{peer}: {e}"));
        }
    }

    fn handle(&self, stream: TcpStream, log: &dyn Log) -> io::Result<()> {
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        drain_headers(&mut reader)?;

        let mut writer = stream;
        let Some((method, path)) = parse_request_line(&request_line) else {
            log.warn(&format!("malformed request: {}", request_line.trim_end()));
            return Response::empty(400, mime::DEFAULT_MIME).write_to(&mut writer, true);
        };
        let response = self.responder.respond(path);
        log.info(&format!("{method} {path} {}", response.status));
        response.write_to(&mut writer, method != "HEAD")?;
        writer.flush()
    }
}

/// Split `METHOD PATH VERSION` into method and path.
#[must_use]
pub fn parse_request_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let path = parts.next()?;
    path.starts_with('/').then_some((method, path))
}

fn drain_headers(reader: &mut impl BufRead) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim_end().is_empty() {
            return Ok(());
        }
    }
}
