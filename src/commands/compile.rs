//! # Compile Command Implementation
//!
//! The `compile` command runs discovery, override computation, full
//! compilation and post-processing, then stops. The environment is never
//! touched, which makes it the safe way to check that the current set of
//! extensions still resolves, or to inspect the lock file before a `sync`.

use anyhow::Result;
use clap::Args;

use depsync::output::{OutputConfig, Status};
use depsync::Synchronizer;

use super::{print_report, vendor_label, RunArgs};

/// Resolve all requirements into the lock file without installing
#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the `compile` command.
pub fn execute(args: CompileArgs, output: &OutputConfig) -> Result<()> {
    let working_dir = args.run.working_dir()?;
    let config = args.run.load_config(&working_dir)?;

    println!(
        "{} Compiling {}{}",
        output.marker(Status::Info),
        output.emphasize(working_dir.display()),
        vendor_label(args.run.gpu)
    );

    match Synchronizer::new(config).compile(&working_dir, args.run.gpu) {
        Ok(report) => {
            print_report(&report, output);
            Ok(())
        }
        Err(e) => {
            println!("{} Compile failed", output.marker(Status::Fail));
            Err(e.into())
        }
    }
}
