//! Shared fixtures for unit tests.
//!
//! [`FakeRunner`] stands in for the resolver and installer. It records every
//! invocation and fakes the two resolver behaviors the pipeline relies on:
//! printing a pinned set to stdout, and writing the file named after `-o`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::runner::ToolRunner;
use crate::tool::{ToolCommand, ToolOutput, OUTPUT_FLAG, RESOLVER};

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tool: String,
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

#[derive(Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<Call>>>,
    core_stdout: String,
    compiled: String,
    fail_commands: HashSet<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stdout of a resolver call without `-o` (the core-only compile).
    pub fn with_core_stdout(mut self, stdout: &str) -> Self {
        self.core_stdout = stdout.to_string();
        self
    }

    /// Content written to the `-o` path of a full compile.
    pub fn with_compiled(mut self, content: &str) -> Self {
        self.compiled = content.to_string();
        self
    }

    /// Make every invocation whose rendered command starts with `prefix` fail.
    pub fn failing(mut self, prefix: &str) -> Self {
        self.fail_commands.insert(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tools(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.tool).collect()
    }
}

impl ToolRunner for FakeRunner {
    fn run(
        &self,
        tool: &str,
        command: &ToolCommand,
        args: &[String],
        cwd: &Path,
    ) -> Result<ToolOutput> {
        let rendered = command.display_with(args);
        self.calls.lock().unwrap().push(Call {
            tool: tool.to_string(),
            command: command.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        if self.fail_commands.iter().any(|p| rendered.starts_with(p)) {
            return Err(Error::ToolFailed {
                tool: tool.to_string(),
                command: rendered,
                status: "exit status: 1".to_string(),
                stderr: "simulated failure".to_string(),
            });
        }

        if tool != RESOLVER {
            return Ok(ToolOutput::default());
        }

        match args.iter().position(|a| a == OUTPUT_FLAG) {
            Some(idx) => {
                let out = cwd.join(&args[idx + 1]);
                fs::write(out, &self.compiled)?;
                Ok(ToolOutput::default())
            }
            None => Ok(ToolOutput {
                stdout: self.core_stdout.clone(),
                stderr: String::new(),
            }),
        }
    }
}
