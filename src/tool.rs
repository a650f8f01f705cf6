//! External tool invocation.
//!
//! Every subprocess `depsync` launches (resolver, installer, bootstrap
//! installer) goes through [`run`]. Calls block until the child exits; stdout
//! and stderr are captured and a non-zero exit status becomes
//! [`Error::ToolFailed`].

use std::fmt;
use std::path::Path;
use std::process::Command;

use log::{debug, trace};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Role name of the dependency resolver in logs and errors.
pub const RESOLVER: &str = "resolver";
/// Role name of the package installer.
pub const INSTALLER: &str = "installer";
/// Role name of the vendor bootstrap installer.
pub const BOOTSTRAP: &str = "bootstrap installer";

/// Flag passing the override table to the resolver.
pub const OVERRIDE_FLAG: &str = "--override";
/// Flag naming the resolver's output file.
pub const OUTPUT_FLAG: &str = "-o";
/// Flag adding a fallback package index.
pub const EXTRA_INDEX_FLAG: &str = "--extra-index-url";
/// Flag asking the installer to report without applying.
pub const DRY_RUN_FLAG: &str = "--dry-run";
/// Flag naming a requirements file for `install`-style commands.
pub const REQUIREMENT_FLAG: &str = "-r";

/// A command template: a program and the fixed arguments that precede
/// per-invocation arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCommand {
    /// Program to execute, looked up on `PATH` when not a path.
    pub program: String,
    /// Leading arguments, e.g. `["pip", "compile", "-q"]`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the full command line for logs and error messages.
    pub fn display_with(&self, extra_args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(extra_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&[]))
    }
}

/// Captured output of a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `command` with `extra_args` appended, in `cwd`.
///
/// `tool` is a short role name ("resolver", "installer") used in errors.
pub fn run(
    tool: &str,
    command: &ToolCommand,
    extra_args: &[String],
    cwd: &Path,
) -> Result<ToolOutput> {
    let rendered = command.display_with(extra_args);
    debug!("Running {}: {} (in {})", tool, rendered, cwd.display());

    let output = Command::new(&command.program)
        .args(&command.args)
        .args(extra_args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::ToolSpawn {
            tool: tool.to_string(),
            command: rendered.clone(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    trace!("{} stdout:\n{}", tool, stdout);
    trace!("{} stderr:\n{}", tool, stderr);

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            command: rendered,
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(ToolOutput { stdout, stderr })
}
