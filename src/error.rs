//! # Error Handling
//!
//! This module defines the centralized error type for the `depsync` library.
//! It uses the `thiserror` library to build a single `Error` enum covering
//! every failure the synchronization pipeline can hit, with messages that
//! carry enough context (tool, command line, stderr) to act on.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum of failure modes.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The failure taxonomy of a run is small:
//!
//! - Discovery that finds nothing is *not* an error.
//! - A resolver or installer that exits non-zero is fatal (`ToolFailed`).
//! - A tool that cannot be started at all is fatal (`ToolSpawn`).
//! - Filesystem and configuration errors are fatal.
//!
//! Nothing is retried. The tool is expected to be re-run after the cause is
//! fixed, and every generated file is rebuilt from scratch on the next run.

use thiserror::Error;

/// Main error type for depsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.depsync.yaml` configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An external tool could not be started (missing binary, bad permissions).
    #[error("Failed to start {tool} ({command}): {message}")]
    ToolSpawn {
        tool: String,
        command: String,
        message: String,
    },

    /// An external tool ran but exited unsuccessfully.
    ///
    /// For the resolver this usually means an unresolvable constraint set,
    /// e.g. two extensions pinning incompatible versions of one package.
    #[error("{tool} failed ({status}): {command}{}", stderr_suffix(stderr))]
    ToolFailed {
        tool: String,
        command: String,
        status: String,
        stderr: String,
    },

    /// An error occurred while reading or writing a generated file.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The working directory given to the synchronizer does not exist.
    #[error("Working directory not found: {path}")]
    MissingWorkingDir { path: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr.trim_end())
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
