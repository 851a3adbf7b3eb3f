use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::archive::installer::{InstallOptions, install_project};

/// Download the project archive and install every manifest-listed entry.
#[derive(Debug)]
pub struct InstallProjectFiles;

impl Step for InstallProjectFiles {
    fn name(&self) -> &'static str {
        "Install project files"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let source = &ctx.config.project;
        let (_payload, mut archive) = ctx.open_remote(&source.url)?;

        let options = InstallOptions {
            overwrite: ctx.overwrite,
            dry_run: ctx.dry_run,
        };
        let report = install_project(&mut archive, source, ctx.target(), options, &*ctx.log)?;
        ctx.log.debug(&format!("install report:\n{report}"));
        ctx.log.info(&report.summary());

        let failed = report.failures().count();
        if failed > 0 {
            anyhow::bail!("{failed} file(s) could not be written");
        }
        if ctx.dry_run {
            return Ok(StepResult::DryRun);
        }
        Ok(StepResult::Ok)
    }
}
