//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `depsync` command-line tool, one file per command.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `depsync` library, and prints a summary.
//!
//! Options shared by `sync` and `compile` live in [`RunArgs`].

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use depsync::config::{self, SyncConfig};
use depsync::output::{OutputConfig, Status};
use depsync::phases::SyncReport;
use depsync::vendor::GpuVendor;

pub mod compile;
pub mod completions;
pub mod discover;
pub mod sync;

/// Options shared by every command that runs the resolver.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Application root holding the core requirements and the extensions
    /// directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// GPU vendor whose package index serves the accelerator packages
    #[arg(long, value_name = "VENDOR", default_value = "none")]
    pub gpu: GpuVendor,

    /// Path to a .depsync.yaml configuration file
    #[arg(short, long, value_name = "FILE", env = "DEPSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// The working directory for this run.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to get current directory"),
        }
    }

    /// Load configuration for `working_dir`, honoring `--config`.
    pub fn load_config(&self, working_dir: &std::path::Path) -> Result<SyncConfig> {
        config::load(self.config.as_deref(), working_dir).with_context(|| match &self.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })
    }
}

/// Print the outcome of a run.
pub fn print_report(report: &SyncReport, output: &OutputConfig) {
    if report.sources.is_empty() {
        println!(
            "{} No requirement files found; nothing to do",
            output.marker(Status::Warn)
        );
        return;
    }

    println!(
        "{} {} requirement file(s) {}",
        output.marker(Status::Info),
        report.sources.len(),
        output.dim(format!(
            "({} core, {} extension)",
            report.sources.core.len(),
            report.sources.extensions.len()
        ))
    );

    if let Some(path) = &report.bootstrapped {
        println!(
            "{} Bootstrapped accelerator builds from {}",
            output.marker(Status::Ok),
            output.emphasize(path.display())
        );
    }
    if let Some(path) = &report.override_file {
        println!(
            "{} Override table: {}",
            output.marker(Status::Ok),
            output.emphasize(path.display())
        );
    }
    if let Some(path) = &report.compiled_file {
        println!(
            "{} Compiled output: {}",
            output.marker(Status::Ok),
            output.emphasize(path.display())
        );
    }
    for line in &report.removed {
        println!(
            "{} Removed conflicting {}",
            output.marker(Status::Warn),
            output.emphasize(line)
        );
    }
    if let Some(mode) = report.installed {
        println!(
            "{} Environment updated ({})",
            output.marker(Status::Ok),
            mode
        );
    }
}

/// Label used when announcing the selected vendor.
pub fn vendor_label(vendor: GpuVendor) -> String {
    if vendor.is_selected() {
        format!(" for {}", vendor)
    } else {
        String::new()
    }
}
