pub mod completions;
pub mod install;
pub mod serve;
pub mod version;

use anyhow::Result;

use crate::logging::Logger;
use crate::steps::{self, Context, Step};

/// Execute every step in order, print the summary, and bail if any step failed.
///
/// # Errors
///
/// Returns an error if one or more steps recorded a failure.
pub fn run_steps_to_completion<'a>(
    steps: impl IntoIterator<Item = &'a dyn Step>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for step in steps {
        steps::execute(step, ctx);
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("{} step(s) failed", log.failure_count());
    }
    Ok(())
}
