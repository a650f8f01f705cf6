//! # High-Level Synchronizer
//!
//! [`Synchronizer`] is the entry point for embedding depsync. It owns a
//! [`SyncConfig`] and a [`ToolRunner`] and exposes the three things a caller
//! wants to do with a working directory: look at what would be resolved,
//! compile it, or compile and install it.
//!
//! The runner is a trait object so that the real subprocess runner can be
//! swapped for a fake in tests, the same way the pipeline never talks to
//! `std::process` directly.

use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::phases::orchestrator::{self, Stage};
use crate::phases::{discovery, manifest, Discovered, RunContext, SyncReport};
use crate::runner::{SystemToolRunner, ToolRunner};
use crate::vendor::GpuVendor;

/// Reconciles core and extension dependencies for one application tree.
pub struct Synchronizer {
    config: SyncConfig,
    runner: Box<dyn ToolRunner>,
}

impl Synchronizer {
    /// Creates a synchronizer that runs real external tools.
    pub fn new(config: SyncConfig) -> Self {
        Self::with_runner(config, Box::new(SystemToolRunner))
    }

    /// Creates a synchronizer with a custom [`ToolRunner`].
    pub fn with_runner(config: SyncConfig, runner: Box<dyn ToolRunner>) -> Self {
        Self { config, runner }
    }

    /// Run the full pipeline: discover, bootstrap, override, compile,
    /// post-process, install.
    pub fn sync(&self, working_dir: &Path, vendor: GpuVendor) -> Result<SyncReport> {
        orchestrator::execute(&self.context(working_dir, vendor), Stage::Install)
    }

    /// Run the pipeline up to the compiled output without touching the
    /// environment.
    pub fn compile(&self, working_dir: &Path, vendor: GpuVendor) -> Result<SyncReport> {
        orchestrator::execute(&self.context(working_dir, vendor), Stage::Compile)
    }

    /// List the requirement sources that would feed resolution.
    pub fn discover(&self, working_dir: &Path) -> Result<Discovered> {
        discovery::execute(&self.config, working_dir)
    }

    /// Discover sources and write the aggregate manifest.
    pub fn write_manifest(&self, working_dir: &Path) -> Result<(Discovered, PathBuf)> {
        let sources = self.discover(working_dir)?;
        let path = manifest::write(&self.context(working_dir, GpuVendor::None), &sources)?;
        Ok((sources, path))
    }

    fn context<'a>(&'a self, working_dir: &'a Path, vendor: GpuVendor) -> RunContext<'a> {
        RunContext {
            config: &self.config,
            runner: self.runner.as_ref(),
            working_dir,
            vendor,
        }
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}
