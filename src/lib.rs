//! # depsync Library
//!
//! This library reconciles the Python dependencies of a plugin-extensible
//! application: the core application declares its own requirements, and every
//! extension installed under `custom_nodes/` declares more. `depsync` merges
//! them into one resolvable set in which core-declared versions always win,
//! compiles that set into a pinned lock file, and applies it with an external
//! installer (by default `uv`).
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use depsync::vendor::GpuVendor;
//!
//! let report = depsync::synchronize(Path::new("/opt/app"), GpuVendor::Nvidia)?;
//! println!("installed from {:?}", report.compiled_file);
//! # Ok::<(), depsync::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `.depsync.yaml` schema. Tool command
//!   templates, generated file names, vendor indexes and exclusive package
//!   pairs are all configuration values.
//! - **Requirement sources (`requirements`)**: Discovered files tagged with
//!   the scope (core or extension) that contributed them.
//! - **Phases (`phases`)**: The pipeline, one module per step.
//! - **Tools (`tool`, `runner`)**: Blocking subprocess invocation behind the
//!   `ToolRunner` trait.
//! - **Synchronizer (`synchronizer`)**: The high-level API tying it together.
//!
//! ## Execution Flow
//!
//! 1.  **Discovery**: Find requirement files in the root and in each extension.
//! 2.  **Bootstrap**: Optionally install vendor accelerator builds with pip.
//! 3.  **Overrides**: Pin the core requirements alone and write them, plus an
//!     optional vendor block, as the override table.
//! 4.  **Compilation**: Resolve everything under the override table.
//! 5.  **Post-processing**: Drop the losing variant of exclusive package pairs.
//! 6.  **Installation**: Install or sync the environment from the lock file.

use std::path::Path;

pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod phases;
pub mod requirements;
pub mod runner;
pub mod synchronizer;
pub mod tool;
pub mod vendor;

#[cfg(test)]
mod postprocess_proptest;
#[cfg(test)]
mod test_support;

pub use synchronizer::Synchronizer;

/// Synchronize `working_dir` for `vendor` with the default configuration.
///
/// This is the whole pipeline in one call: it blocks until the installer
/// finishes and fails on the first tool that exits unsuccessfully.
pub fn synchronize(
    working_dir: &Path,
    vendor: vendor::GpuVendor,
) -> error::Result<phases::SyncReport> {
    Synchronizer::default().sync(working_dir, vendor)
}
