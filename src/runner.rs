//! The seam between the pipeline and external processes.
//!
//! Phases never spawn processes themselves; they hand a [`ToolCommand`] and
//! arguments to a [`ToolRunner`]. [`SystemToolRunner`] executes them for real
//! via [`crate::tool::run`]. Tests substitute a runner that records calls and
//! fakes resolver output.

use std::path::Path;

use crate::error::Result;
use crate::tool::{ToolCommand, ToolOutput};

/// Runs external tools on behalf of the pipeline.
pub trait ToolRunner: Send + Sync {
    /// Run `command` with `args` appended, in `cwd`.
    ///
    /// Implementations must return an error for a non-zero exit status so
    /// that no caller can forget the check.
    fn run(&self, tool: &str, command: &ToolCommand, args: &[String], cwd: &Path)
        -> Result<ToolOutput>;
}

/// Runs tools as blocking child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(
        &self,
        tool: &str,
        command: &ToolCommand,
        args: &[String],
        cwd: &Path,
    ) -> Result<ToolOutput> {
        crate::tool::run(tool, command, args, cwd)
    }
}
