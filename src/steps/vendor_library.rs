use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::archive::sanitize::join_within;
use crate::error::{InstallError, ToolError};

/// Run the external vendor library installer against the vendor directory.
#[derive(Debug)]
pub struct InstallVendorLibrary;

impl Step for InstallVendorLibrary {
    fn name(&self) -> &'static str {
        "Install vendor library"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let tool = &ctx.config.vendor;
        let vendor_dir = join_within(ctx.target(), &tool.directory).ok_or_else(|| {
            InstallError::PathEscapesTarget {
                path: tool.directory.display().to_string(),
            }
        })?;
        let args = tool.command_args(&vendor_dir);

        if !ctx.executor.which(&tool.program) {
            return Err(ToolError::NotFound {
                program: tool.program.clone(),
            }
            .into());
        }

        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would run {} {}", tool.program, args.join(" ")));
            return Ok(StepResult::DryRun);
        }

        ctx.log
            .debug(&format!("running {} {}", tool.program, args.join(" ")));
        let result = ctx
            .executor
            .run_in(ctx.target(), &tool.program, &args)?
            .checked(&tool.program)?;
        for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
            ctx.log.debug(line);
        }
        ctx.log.info(&format!(
            "{} installed into {}",
            tool.program,
            vendor_dir.display()
        ));
        Ok(StepResult::Ok)
    }
}
