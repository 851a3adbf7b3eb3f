//! External command invocation.
//!
//! The installer shells out exactly once (the vendor library installer), and
//! does so through the [`Executor`] trait so steps can be tested with a fake.
use std::path::Path;
use std::process::{Command, Output};

use crate::error::ToolError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl ExecResult {
    /// Turn a non-zero exit into [`ToolError::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Failed`] when the process did not succeed.
    pub fn checked(self, program: &str) -> Result<Self, ToolError> {
        if self.success {
            return Ok(self);
        }
        Err(ToolError::Failed {
            program: program.to_string(),
            code: self.code.unwrap_or(-1),
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs external programs.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` inside `dir` and capture its output.
    ///
    /// A non-zero exit is *not* an error here; inspect
    /// [`ExecResult::success`] or call [`ExecResult::checked`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the process cannot be started.
    fn run_in(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecResult, ToolError>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecResult, ToolError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
