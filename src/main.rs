//! # depsync CLI
//!
//! This is the binary entry point for the `depsync` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging and terminal output.
//! - Executing the selected command and turning errors into a non-zero exit.
//!
//! The synchronization logic lives in the `depsync` library crate; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
