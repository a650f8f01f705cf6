//! Phase 5: Installation
//!
//! Applies the compiled output to the current environment.
//!
//! - [`InstallMode::Install`] adds or upgrades the listed packages and leaves
//!   anything else installed alone (`uv pip install -r <lock>`).
//! - [`InstallMode::Sync`] makes the environment match the lock exactly,
//!   uninstalling unlisted packages (`uv pip sync <lock>`).
//!
//! Both modes receive the vendor's extra index and honor dry-run.

use std::path::Path;

use log::info;

use super::RunContext;
use crate::config::InstallMode;
use crate::error::Result;
use crate::requirements::relative_to;
use crate::tool::{ToolCommand, DRY_RUN_FLAG, INSTALLER, REQUIREMENT_FLAG};

/// Executes Phase 5 of the pipeline.
pub fn execute(ctx: &RunContext<'_>, compiled: &Path) -> Result<()> {
    let mode = ctx.config.install_mode;
    let (command, args) = install_args(ctx, compiled);

    info!(
        "Running {} against {}{}",
        mode,
        ctx.config.compiled_file,
        if ctx.config.dry_run { " (dry run)" } else { "" }
    );
    let output = ctx.runner.run(INSTALLER, command, &args, ctx.working_dir)?;
    if ctx.config.dry_run && !output.stderr.trim().is_empty() {
        // uv reports planned changes on stderr
        info!("{}", output.stderr.trim_end());
    }

    Ok(())
}

fn install_args<'a>(ctx: &RunContext<'a>, compiled: &Path) -> (&'a ToolCommand, Vec<String>) {
    let lock = relative_to(compiled, ctx.working_dir)
        .to_string_lossy()
        .into_owned();

    let (command, mut args) = match ctx.config.install_mode {
        InstallMode::Install => (
            &ctx.config.tools.install,
            vec![REQUIREMENT_FLAG.to_string(), lock],
        ),
        InstallMode::Sync => (&ctx.config.tools.sync, vec![lock]),
    };
    args.extend(ctx.extra_index_args());
    if ctx.config.dry_run {
        args.push(DRY_RUN_FLAG.to_string());
    }

    (command, args)
}
