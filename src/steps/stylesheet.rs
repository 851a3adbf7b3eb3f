use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::archive::asset::{AssetOutcome, install_asset};

/// Install the base stylesheet from its own archive, unless already present.
#[derive(Debug)]
pub struct InstallStylesheet;

impl Step for InstallStylesheet {
    fn name(&self) -> &'static str {
        "Install base stylesheet"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let source = &ctx.config.stylesheet;
        let (_payload, mut archive) = ctx.open_remote(&source.url)?;

        match install_asset(&mut archive, source, ctx.target(), ctx.dry_run, &*ctx.log)? {
            AssetOutcome::Installed(_) if ctx.dry_run => Ok(StepResult::DryRun),
            AssetOutcome::Installed(_) | AssetOutcome::AlreadyPresent(_) => Ok(StepResult::Ok),
            AssetOutcome::EntryNotFound => Ok(StepResult::Skipped(format!(
                "'{}' not found in archive",
                source.entry
            ))),
            AssetOutcome::Failed(err) => Err(err.into()),
        }
    }
}
