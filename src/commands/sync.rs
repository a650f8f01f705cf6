//! # Sync Command Implementation
//!
//! The `sync` command runs the whole pipeline against an application tree:
//! discover requirement files, bootstrap vendor builds, build the override
//! table from the core requirements, compile everything, drop conflicting
//! package variants, and install the result.
//!
//! `--mode` chooses between additive `install` and exact `sync` semantics;
//! `--dry-run` asks the installer to report without changing anything. Both
//! override the configuration file.

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use depsync::config::InstallMode;
use depsync::output::{OutputConfig, Status};
use depsync::Synchronizer;

use super::{print_report, vendor_label, RunArgs};

/// Resolve all requirements and install them into the current environment
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Install semantics: `install` adds and upgrades, `sync` also removes
    /// packages that are not in the compiled output
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<InstallMode>,

    /// Report what the installer would change without applying it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    let working_dir = args.run.working_dir()?;
    let mut config = args.run.load_config(&working_dir)?;
    if let Some(mode) = args.mode {
        config.install_mode = mode;
    }
    if args.dry_run {
        config.dry_run = true;
    }

    println!(
        "{} Synchronizing {}{}",
        output.marker(Status::Info),
        output.emphasize(working_dir.display()),
        vendor_label(args.run.gpu)
    );
    if config.dry_run {
        println!(
            "{} DRY RUN - the environment will not be changed",
            output.marker(Status::Warn)
        );
    }

    let synchronizer = Synchronizer::new(config);
    match synchronizer.sync(&working_dir, args.run.gpu) {
        Ok(report) => {
            print_report(&report, output);
            println!(
                "{} Done in {:.2}s",
                output.marker(Status::Ok),
                start_time.elapsed().as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} Sync failed", output.marker(Status::Fail));
            Err(e.into())
        }
    }
}
