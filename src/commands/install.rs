use std::sync::Arc;

use anyhow::Result;

use super::run_steps_to_completion;
use super::version::version;
use crate::cli::InstallOpts;
use crate::config;
use crate::exec::{Executor, SystemExecutor};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::logging::{Log, Logger};
use crate::steps::{self, Context, Step};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the target
/// directory does not exist, or any step fails.
pub fn run(opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    run_with(
        opts,
        log,
        Arc::new(HttpFetcher::new()),
        Arc::new(SystemExecutor),
    )
}

/// Run the install command with explicit fetcher and executor.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the target
/// directory does not exist, or any step fails.
pub fn run_with(
    opts: &InstallOpts,
    log: &Arc<Logger>,
    fetcher: Arc<dyn Fetcher>,
    executor: Arc<dyn Executor>,
) -> Result<()> {
    log.info(&format!("kaizen {}", version()));

    log.stage("Loading configuration");
    let config = config::load(opts.config.as_deref())?;
    let target = config::resolve_target(&opts.dir)?;
    log.info(&format!("target: {}", target.display()));
    log.debug(&format!("project archive: {}", config.project.url));
    log.debug(&format!("stylesheet archive: {}", config.stylesheet.url));
    if opts.overwrite {
        log.warn("overwrite enabled: existing files listed in the manifest will be replaced");
    }

    let ctx = Context {
        config: Arc::new(config),
        target,
        overwrite: opts.overwrite,
        dry_run: opts.dry_run,
        log: Arc::clone(log) as Arc<dyn Log>,
        fetcher,
        executor,
    };

    let all_steps = steps::all_install_steps();
    let selected = select_steps(&all_steps, &opts.skip, &opts.only);
    run_steps_to_completion(selected, &ctx, log)
}

/// Filter steps by `--skip` and `--only` (case-insensitive substring match).
///
/// `only` takes precedence when both are given.
#[must_use]
pub fn select_steps<'a>(
    all: &'a [Box<dyn Step>],
    skip: &[String],
    only: &[String],
) -> Vec<&'a dyn Step> {
    all.iter()
        .filter(|s| {
            let name = s.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !skip.is_empty() {
                return !skip.iter().any(|k| name.contains(&k.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}
