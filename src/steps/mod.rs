//! Named units of work run in order by the install command.
mod context;
pub mod project_files;
pub mod stylesheet;
pub mod vendor_library;

pub use context::Context;

use anyhow::Result;

use crate::logging::StepStatus;

/// Result of a single step execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// Step completed successfully.
    Ok,
    /// Step was skipped with a reason.
    Skipped(String),
    /// Step ran in dry-run mode.
    DryRun,
}

/// A named, executable step.
pub trait Step: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step could not complete: the archive could
    /// not be retrieved or opened, the manifest is unusable, a file could
    /// not be written, or the external tool failed.
    fn run(&self, ctx: &Context) -> Result<StepResult>;
}

/// The complete set of steps run by the install command, in execution order.
///
/// Each step is independent: a failure in one does not prevent the next
/// from running.
#[must_use]
pub fn all_install_steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(project_files::InstallProjectFiles),
        Box::new(stylesheet::InstallStylesheet),
        Box::new(vendor_library::InstallVendorLibrary),
    ]
}

/// Execute a step, recording the result in the logger.
pub fn execute(step: &dyn Step, ctx: &Context) {
    ctx.log.stage(step.name());

    match step.run(ctx) {
        Ok(StepResult::Ok) => {
            ctx.log.record_step(step.name(), StepStatus::Ok, None);
        }
        Ok(StepResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_step(step.name(), StepStatus::Skipped, Some(&reason));
        }
        Ok(StepResult::DryRun) => {
            ctx.log.record_step(step.name(), StepStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", step.name()));
            ctx.log
                .record_step(step.name(), StepStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
