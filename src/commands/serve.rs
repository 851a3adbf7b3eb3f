use anyhow::{Context as _, Result};

use crate::cli::ServeOpts;
use crate::config;
use crate::logging::Logger;
use crate::preview::PreviewResponder;
use crate::preview::server::PreviewServer;

/// Run the serve command. Blocks until the process is stopped.
///
/// # Errors
///
/// Returns an error if the directory does not exist or the address cannot be
/// bound.
pub fn run(opts: &ServeOpts, log: &Logger) -> Result<()> {
    let server = bind(opts)?;
    let addr = server.local_addr()?;
    log.stage("Preview server");
    log.info(&format!("serving on http://{addr}/"));
    server.serve(log);
    Ok(())
}

/// Resolve the served directory and bind the listener.
///
/// # Errors
///
/// Returns an error if the directory does not exist or the address cannot be
/// bound.
pub fn bind(opts: &ServeOpts) -> Result<PreviewServer> {
    let root = config::resolve_target(&opts.dir)?;
    let address = (opts.bind.as_str(), opts.port);
    PreviewServer::bind(address, PreviewResponder::new(root))
        .with_context(|| format!("cannot listen on {}:{}", opts.bind, opts.port))
}
