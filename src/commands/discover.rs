//! # Discover Command Implementation
//!
//! The `discover` command lists the requirement files a `sync` would feed to
//! the resolver, tagged with the scope (core or extension) that contributed
//! them. It is read-only unless `--manifest` is given, in which case it also
//! writes an aggregate requirements file linking every discovered
//! `requirements.txt` with `-r` lines.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use depsync::output::{OutputConfig, Status};
use depsync::requirements::relative_to;
use depsync::Synchronizer;

/// List the requirement files that would be resolved
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Application root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Path to a .depsync.yaml configuration file
    #[arg(short, long, value_name = "FILE", env = "DEPSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write the aggregate requirements manifest
    #[arg(long)]
    pub manifest: bool,
}

/// Execute the `discover` command.
pub fn execute(args: DiscoverArgs, output: &OutputConfig) -> Result<()> {
    let run = super::RunArgs {
        dir: args.dir,
        gpu: Default::default(),
        config: args.config,
    };
    let working_dir = run.working_dir()?;
    let synchronizer = Synchronizer::new(run.load_config(&working_dir)?);

    let sources = if args.manifest {
        let (sources, path) = synchronizer.write_manifest(&working_dir)?;
        println!(
            "{} Wrote manifest {}",
            output.marker(Status::Ok),
            output.emphasize(path.display())
        );
        sources
    } else {
        synchronizer.discover(&working_dir)?
    };

    if sources.is_empty() {
        println!(
            "{} No requirement files found in {}",
            output.marker(Status::Warn),
            working_dir.display()
        );
        return Ok(());
    }

    for source in sources.all() {
        println!(
            "{} {}",
            output.dim(format!("{:<9}", source.scope)),
            relative_to(&source.path, &working_dir).display()
        );
    }

    Ok(())
}
